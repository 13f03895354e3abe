use thiserror::Error;

/// Failures the pipeline can encounter, split between per-message problems
/// the consume loop recovers from and conditions that end the process.
#[derive(Debug, Error)]
pub enum SibylError {
    /// Payload was not valid UTF-8, not valid JSON, or not a JSON object.
    #[error("malformed message payload: {0}")]
    MalformedMessage(String),

    /// The record parsed but lacks a usable value for a required field.
    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),

    /// The paired trend sequences would end up with different lengths.
    /// Unreachable through the public append path; fatal if it fires.
    #[error("trend sequences desynchronized: {timestamps} timestamps vs {sentiments} sentiments")]
    InvariantViolation { timestamps: usize, sentiments: usize },

    /// The chart backend cannot draw. Fatal: the chart is the sole output.
    #[error("display backend unavailable: {0}")]
    DisplayUnavailable(#[source] std::io::Error),

    #[error("transport failure: {0}")]
    Transport(#[from] rdkafka::error::KafkaError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SibylError {
    /// True for per-message failures the consume loop logs and skips past.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            SibylError::MalformedMessage(_) | SibylError::MissingField(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_level_errors_are_skippable() {
        assert!(SibylError::MalformedMessage("not json".to_owned()).is_skippable());
        assert!(SibylError::MissingField("sentiment").is_skippable());
    }

    #[test]
    fn structural_errors_are_fatal() {
        let desync = SibylError::InvariantViolation {
            timestamps: 2,
            sentiments: 1,
        };
        assert!(!desync.is_skippable());
        assert!(!SibylError::Config("no such file".to_owned()).is_skippable());
    }
}
