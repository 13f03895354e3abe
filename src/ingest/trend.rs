use crate::error::SibylError;

const DEFAULT_TREND_CAPACITY: usize = 10000;

/// Append-only history of observed sentiment, paired by index with the
/// timestamp each score arrived under. Lives for the process lifetime and
/// only ever grows; the chart reads it between appends.
#[derive(Debug)]
pub struct TrendStore {
    timestamps: Vec<String>,
    sentiments: Vec<f64>,
}

impl TrendStore {
    pub fn new() -> Self {
        Self {
            timestamps: Vec::with_capacity(DEFAULT_TREND_CAPACITY),
            sentiments: Vec::with_capacity(DEFAULT_TREND_CAPACITY),
        }
    }

    /// Append one (timestamp, sentiment) pair. Both sequences grow by one
    /// together or the call fails without touching either.
    pub fn append(&mut self, timestamp: String, sentiment: f64) -> Result<(), SibylError> {
        if self.timestamps.len() != self.sentiments.len() {
            return Err(SibylError::InvariantViolation {
                timestamps: self.timestamps.len(),
                sentiments: self.sentiments.len(),
            });
        }
        self.timestamps.push(timestamp);
        self.sentiments.push(sentiment);
        Ok(())
    }

    /// Read-only view of the paired sequences, for one redraw.
    pub fn snapshot(&self) -> (&[String], &[f64]) {
        (&self.timestamps, &self.sentiments)
    }

    pub fn len(&self) -> usize {
        self.sentiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentiments.is_empty()
    }
}

impl Default for TrendStore {
    fn default() -> Self {
        Self::new()
    }
}
