use serde::Serialize;

use crate::error::EchoError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Non-blocking message for the host UI to display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

impl From<EchoError> for Notice {
    fn from(err: EchoError) -> Self {
        Notice::warning(err.to_string())
    }
}

impl From<anyhow::Error> for Notice {
    fn from(err: anyhow::Error) -> Self {
        Notice::warning(format!("{err:#}"))
    }
}

/// What a handler hands back alongside the session.
pub type Outcome<T> = Result<T, Notice>;
