//! Events relayed to the host callback.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationEventKind {
    Click,
    Hidden,
    Dismissed,
    TimedOut,
    Error,
}

impl NotificationEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEventKind::Click => "click",
            NotificationEventKind::Hidden => "hidden",
            NotificationEventKind::Dismissed => "dismissed",
            NotificationEventKind::TimedOut => "timedout",
            NotificationEventKind::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the OS removed a toast from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalReason {
    UserCanceled,
    ApplicationHidden,
    TimedOut,
    /// A value the OS may add later.
    Unknown(i32),
}

impl DismissalReason {
    /// Maps the raw `ToastDismissalReason` value.
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => DismissalReason::UserCanceled,
            1 => DismissalReason::ApplicationHidden,
            2 => DismissalReason::TimedOut,
            other => DismissalReason::Unknown(other),
        }
    }

    pub fn event_kind(&self) -> Option<NotificationEventKind> {
        match self {
            DismissalReason::ApplicationHidden => Some(NotificationEventKind::Hidden),
            DismissalReason::UserCanceled => Some(NotificationEventKind::Dismissed),
            DismissalReason::TimedOut => Some(NotificationEventKind::TimedOut),
            DismissalReason::Unknown(_) => None,
        }
    }
}

/// One callback invocation: `callback(event, id, userInfo)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub event: NotificationEventKind,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<Value>,
}

impl NotificationEvent {
    pub fn new(event: NotificationEventKind, id: impl Into<String>, user_info: &str) -> Self {
        Self {
            event,
            id: id.into(),
            user_info: parse_user_info(user_info),
        }
    }
}

/// Parses the serialized user-info for the host.
///
/// Empty input means "no user-info". Input that is not JSON is passed through
/// as a JSON string.
pub fn parse_user_info(user_info: &str) -> Option<Value> {
    if user_info.is_empty() {
        return None;
    }

    match serde_json::from_str(user_info) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("User info is not valid JSON, passing it as a string: {}", e);
            Some(Value::String(user_info.to_string()))
        }
    }
}
