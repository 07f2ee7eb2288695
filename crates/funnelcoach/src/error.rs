use funnelcoach_core::analysis::{Field, SubmissionError, EMPTY_ANALYSIS, TRANSPORT_FAILURE};

/// Failures shown to the user instead of a report.
#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("{message} ({flag})")]
    Validation { flag: String, message: String },

    #[error("{}", TRANSPORT_FAILURE)]
    Transport(String),

    #[error("Error: {0}")]
    Backend(String),

    #[error("Analysis Error: {0}")]
    Flagged(String),

    #[error("{}", EMPTY_ANALYSIS)]
    EmptyAnalysis,
}

impl From<SubmissionError> for Error {
    fn from(err: SubmissionError) -> Self {
        let flag = match err.field() {
            Field::SalesRepNames => "--reps",
            Field::Transcript => "--transcript",
        };
        Error::Validation {
            flag: flag.to_string(),
            message: err.to_string(),
        }
    }
}
