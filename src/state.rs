use crate::config::NotificationsConfig;
use crate::error::{NotificationError, Result};
use crate::notifications::{
    aumid, DesktopNotificationPermission, DesktopNotificationsManager, Dispatcher,
    NotificationEvent, WinRtBackend,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Runtime};

/// Webview event carrying every [`NotificationEvent`].
pub const NOTIFICATION_EVENT: &str = "desktop-notifications://event";

pub type Manager = DesktopNotificationsManager<WinRtBackend>;

/// Notification state managed by the Tauri app.
pub struct NotificationsState {
    manager: RwLock<Option<Arc<Manager>>>,
}

impl NotificationsState {
    /// Build the manager with a callback that emits to the webview, and start
    /// the dispatcher on Tauri's async runtime.
    pub fn initialize<R: Runtime>(app_handle: &AppHandle<R>, config: &NotificationsConfig) -> Self {
        let emitter = app_handle.clone();
        let (mailbox, dispatcher) = Dispatcher::new(move |event: &NotificationEvent| {
            if let Err(e) = emitter.emit(NOTIFICATION_EVENT, event) {
                tracing::warn!("Failed to emit '{}' for {}: {}", event.event, event.id, e);
            }
        });
        tauri::async_runtime::spawn(dispatcher.run());

        let manager = DesktopNotificationsManager::new(WinRtBackend::new(), config, mailbox);

        if config.register_activator && !manager.app_id().is_empty() {
            match std::env::current_exe() {
                Ok(exe) => {
                    if let Err(e) = aumid::ensure_activator_registered(manager.app_id(), config, &exe) {
                        tracing::warn!("AUMID registration failed: {}", e);
                    }
                }
                Err(e) => tracing::warn!("Could not resolve the executable path: {}", e),
            }
        }

        tracing::info!("Desktop notifications initialized for '{}'", manager.app_id());

        Self {
            manager: RwLock::new(Some(Arc::new(manager))),
        }
    }

    pub fn manager(&self) -> Result<Arc<Manager>> {
        self.manager
            .read()
            .clone()
            .ok_or_else(|| NotificationError::Other("Notifications are not initialized".to_string()))
    }

    pub fn permission(&self) -> DesktopNotificationPermission {
        match self.manager() {
            Ok(manager) => manager.current_permission(),
            Err(_) => DesktopNotificationPermission::Default,
        }
    }

    /// Drop the manager; it unregisters the activator once the last command
    /// holding it returns.
    pub fn terminate(&self) {
        if self.manager.write().take().is_some() {
            tracing::info!("Desktop notifications terminated");
        }
    }
}
