//! Commands the webview uses to drive toast notifications.
//!
//! Register them in the app's invoke handler:
//! `tauri::generate_handler![desktop_notifications::commands::notification::display_toast, ...]`.

use tauri::{command, State};

use crate::error::{status_code, NotificationError};
use crate::notifications::{self, DesktopNotificationPermission};
use crate::state::NotificationsState;

/// Show a toast. Returns 0 on success, otherwise the OS status code.
#[command]
pub fn display_toast(
    state: State<'_, NotificationsState>,
    id: String,
    title: String,
    body: String,
    user_info: Option<serde_json::Value>,
) -> i32 {
    let result = state.manager().and_then(|manager| {
        let user_info = match user_info {
            Some(value) => serde_json::to_string(&value)?,
            None => String::new(),
        };
        manager.display_toast(&id, &title, &body, &user_info)
    });
    status_code(&result)
}

#[command]
pub fn close_toast(state: State<'_, NotificationsState>, id: String) -> bool {
    match state.manager() {
        Ok(manager) => manager.close_toast(&id),
        Err(e) => {
            tracing::warn!("close_toast({}) failed: {}", id, e);
            false
        }
    }
}

#[command]
pub fn get_notifications_permission(
    state: State<'_, NotificationsState>,
) -> DesktopNotificationPermission {
    state.permission()
}

/// Windows never prompts for notification permission; this reports the
/// current setting.
#[command]
pub fn request_notifications_permission(
    state: State<'_, NotificationsState>,
) -> DesktopNotificationPermission {
    state.permission()
}

#[command]
pub fn supports_notifications() -> bool {
    notifications::supports_notifications()
}

#[command]
pub fn notification_settings_url() -> &'static str {
    notifications::NOTIFICATION_SETTINGS_URL
}

#[command]
pub fn terminate_notifications(state: State<'_, NotificationsState>) -> Result<(), NotificationError> {
    state.terminate();
    Ok(())
}
