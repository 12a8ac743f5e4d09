pub const SUBMISSION_FAILED: &str = "submission_failed";
pub const VALIDATION_FAILED: &str = "validation_failed";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Configuration(String),

    #[error("transport: {0}")]
    Transport(String),

    #[error("{}", .0.as_deref().unwrap_or(VALIDATION_FAILED))]
    ServerValidation(Option<String>),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Text shown to the visitor for a failure.
///
/// `Key` is a translation key resolved by the web layer, `Verbatim` is shown
/// as-is (a message written by the lead API).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Key(&'static str),
    Verbatim(String),
}

impl Error {
    pub fn notice(&self) -> Notice {
        match self {
            Error::ServerValidation(Some(message)) => Notice::Verbatim(message.to_owned()),
            Error::ServerValidation(None) => Notice::Key(VALIDATION_FAILED),
            Error::Configuration(_) | Error::Transport(_) | Error::Unknown(_) => {
                Notice::Key(SUBMISSION_FAILED)
            }
        }
    }
}

#[macro_export]
macro_rules! bail {
    (config: $($arg:tt)*) => {
        return Err($crate::Error::Configuration(format!($($arg)*)))
    };
    (transport: $($arg:tt)*) => {
        return Err($crate::Error::Transport(format!($($arg)*)))
    };
}
