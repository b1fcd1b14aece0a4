use thiserror::Error;

use crate::notifications::launch_args::LaunchArgsError;

/// `E_FAIL`, reported for failures that carry no OS status of their own.
pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("{context}: {message} (0x{code:08X})")]
    Os {
        context: String,
        code: i32,
        message: String,
    },

    #[error("Launch arguments error: {0}")]
    LaunchArgs(#[from] LaunchArgsError),

    #[error("Toast XML error: {0}")]
    Xml(String),

    #[error("Toast template has {0} text node(s), expected at least 2")]
    MissingTextNodes(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl NotificationError {
    /// Status code handed back to the host for a failed call.
    pub fn status_code(&self) -> i32 {
        match self {
            NotificationError::Os { code, .. } => *code,
            _ => E_FAIL,
        }
    }
}

impl serde::Serialize for NotificationError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for NotificationError {
    fn from(err: windows::core::Error) -> Self {
        NotificationError::Os {
            context: "Windows API call failed".to_string(),
            code: err.code().0,
            message: err.message().to_string(),
        }
    }
}

#[cfg(windows)]
impl From<tauri::Error> for NotificationError {
    fn from(err: tauri::Error) -> Self {
        NotificationError::Other(format!("Tauri error: {}", err))
    }
}

/// Status code for a host-facing call: 0 on success.
pub fn status_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status_code(),
    }
}

pub type Result<T> = std::result::Result<T, NotificationError>;
