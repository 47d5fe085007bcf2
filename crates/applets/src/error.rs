//! Error types shared by the applets

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppletError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid grab date '{date}': {message}")]
    Date { date: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppletError {
    pub fn date(date: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Date {
            date: date.into(),
            message: message.into(),
        }
    }
}

pub type AppletResult<T> = Result<T, AppletError>;
