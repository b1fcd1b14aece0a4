//! Process-wide notification context.
//!
//! The manager is built once per process with an explicit backend, config and
//! mailbox, and is torn down on drop: the mailbox is closed (releasing the
//! host callback), tracked notifications are cleared and the activator is
//! unregistered.

use parking_lot::Mutex;

use super::backend::ToastBackend;
use super::dispatch::EventMailbox;
use super::notification::DesktopNotification;
use super::permission::DesktopNotificationPermission;
use super::registry::NotificationRegistry;
use super::router::EventRouter;
use crate::config::NotificationsConfig;
use crate::error::Result;

pub struct DesktopNotificationsManager<B: ToastBackend> {
    backend: B,
    app_id: String,
    group: String,
    router: EventRouter,
    notifications: Mutex<NotificationRegistry<DesktopNotification<B::Toast>>>,
    activator_registered: bool,
}

impl<B: ToastBackend> DesktopNotificationsManager<B> {
    /// Resolve the app id and publish the activator.
    ///
    /// Failures are logged and leave the manager in a degraded state: toasts
    /// may still show, but cold-start activation may not reach this process.
    pub fn new(backend: B, config: &NotificationsConfig, mailbox: EventMailbox) -> Self {
        let router = EventRouter::new(mailbox);
        let mut manager = Self {
            backend,
            app_id: String::new(),
            group: config.group_name.clone(),
            router,
            notifications: Mutex::new(NotificationRegistry::new()),
            activator_registered: false,
        };

        if let Some(app_id) = config.app_id.as_deref() {
            tracing::info!("Using custom App User Model ID '{}'", app_id);
        }

        match manager.backend.resolve_app_id(config.app_id.as_deref()) {
            Ok(app_id) => manager.app_id = app_id,
            Err(e) => {
                tracing::error!("Couldn't resolve the App User Model ID: {}", e);
                return manager;
            }
        }

        if config.register_activator {
            match manager
                .backend
                .register_activator(config.toast_activator_clsid, manager.router.clone())
            {
                Ok(()) => {
                    manager.activator_registered = true;
                    tracing::info!(
                        "Registered toast activator {{{}}} for '{}'",
                        config.toast_activator_clsid,
                        manager.app_id
                    );
                }
                Err(e) => tracing::error!("Failed to register Action Center activator: {}", e),
            }
        }

        manager
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// The event sink, for collaborators that receive OS events directly.
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    pub fn is_activator_registered(&self) -> bool {
        self.activator_registered
    }

    pub fn current_permission(&self) -> DesktopNotificationPermission {
        match self.backend.setting(&self.app_id) {
            Ok(setting) => setting.into(),
            Err(e) => {
                tracing::error!(
                    "Failed to retrieve NotificationSettings to ensure your appId is registered: {}",
                    e
                );
                DesktopNotificationPermission::Default
            }
        }
    }

    /// Track a new notification and show it.
    ///
    /// Clicks go through the activator when it is registered and through the
    /// toast's own `Activated` event otherwise, never both.
    pub fn display_toast(&self, id: &str, title: &str, body: &str, user_info: &str) -> Result<()> {
        let mut notifications = self.notifications.lock();
        let notification =
            notifications.push(DesktopNotification::new(id, &self.app_id, title, body, user_info));

        notification
            .create_toast(&self.backend, &self.group, &self.router, !self.activator_registered)
            .inspect_err(|e| tracing::error!("Failed to show notification {}: {}", id, e))
    }

    /// Stop tracking `id` and remove it from the notification history.
    ///
    /// Returns `false` if `id` is not tracked or the OS refused the removal.
    pub fn close_toast(&self, id: &str) -> bool {
        let Some(notification) = self.notifications.lock().remove(id) else {
            tracing::debug!("Notification {} is not tracked", id);
            return false;
        };

        match self
            .backend
            .remove_grouped_tag(&self.app_id, notification.id(), &self.group)
        {
            Ok(()) => {
                tracing::info!("Notification {} closed", id);
                true
            }
            Err(e) => {
                tracing::error!("Notification {} does not exist: {}", id, e);
                false
            }
        }
    }

    pub fn tracked_ids(&self) -> Vec<String> {
        self.notifications.lock().ids()
    }

    /// Entry point for the out-of-process activator.
    pub fn handle_activator_event(&self, launch_args: &str) {
        self.router.activator(launch_args);
    }
}

impl<B: ToastBackend> Drop for DesktopNotificationsManager<B> {
    fn drop(&mut self) {
        self.router.close();
        self.notifications.lock().clear();

        if self.activator_registered {
            if let Err(e) = self.backend.unregister_activator() {
                tracing::error!("Failed to unregister Action Center activator: {}", e);
            }
        }
        tracing::info!("Desktop notifications manager shut down");
    }
}
