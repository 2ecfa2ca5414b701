use chrono::NaiveDateTime;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Sample – one timestamped measurement
// ---------------------------------------------------------------------------

/// A single timestamped temperature reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Series – the validated, ordered sequence
// ---------------------------------------------------------------------------

/// An ordered sequence of samples.
///
/// The sample vector is private: a `Series` can only be built through
/// [`Series::from_samples`], which enforces strictly increasing timestamps
/// (a duplicate timestamp counts as an ordering violation). Hourly gaps are
/// fine — ordering is validated, spacing is not.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Validate ordering and wrap the samples.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self, DataError> {
        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(DataError::Order {
                    row: i + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(Series { samples })
    }

    /// Build a series from parallel timestamp/value slices of equal length.
    /// Mostly a test convenience.
    pub fn from_parts(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self, DataError> {
        let samples = timestamps
            .into_iter()
            .zip(values)
            .map(|(timestamp, value)| Sample { timestamp, value })
            .collect();
        Series::from_samples(samples)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterator over the measurement values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// Iterator over the time axis.
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.samples.iter().map(|s| s.timestamp)
    }

    /// Keep every `stride`-th sample (indices 0, stride, 2·stride, …).
    ///
    /// Used to thin long series before rendering. The result has
    /// `ceil(len / stride)` samples; stride 1 is the identity. Striding
    /// preserves order, so no re-validation is needed.
    pub fn limit_stride(&self, stride: usize) -> Result<Series, DataError> {
        if stride == 0 {
            return Err(DataError::Config("stride must be at least 1".into()));
        }
        Ok(Series {
            samples: self.samples.iter().copied().step_by(stride).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Filter configuration
// ---------------------------------------------------------------------------

/// Which smoothing strategy to run.
///
/// Extension point: further kinds (exponential, median, …) slot in here
/// without touching the loader or exporter contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    MovingAverage,
    LowPass,
}

impl FilterKind {
    /// Canonical human-readable name, as written into the output artifact.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::MovingAverage => "Moving Average",
            FilterKind::LowPass => "Low Pass",
        }
    }
}

/// Parameters of one filtering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub kind: FilterKind,
    /// Number of samples averaged per output sample. Must satisfy
    /// `1 ≤ window_size ≤ series length`.
    pub window_size: usize,
    /// Human-readable filter name persisted alongside the output. Carried
    /// verbatim so consumers can tell which filter produced a series
    /// without re-deriving it.
    pub label: String,
}

impl FilterConfig {
    pub fn moving_average(window_size: usize) -> Self {
        FilterConfig {
            kind: FilterKind::MovingAverage,
            window_size,
            label: FilterKind::MovingAverage.label().to_string(),
        }
    }

    pub fn low_pass(window_size: usize) -> Self {
        FilterConfig {
            kind: FilterKind::LowPass,
            window_size,
            label: FilterKind::LowPass.label().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredSeries – smoothed samples plus provenance
// ---------------------------------------------------------------------------

/// A smoothed series with the configuration that produced it attached for
/// the lifetime of the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSeries {
    pub series: Series,
    pub config: FilterConfig,
}
