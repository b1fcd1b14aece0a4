//! Windows toast notifications with host callbacks.
//!
//! This module provides:
//! - The launch-argument codec and toast XML population
//! - The notification manager and its registry of live toasts
//! - An ordered mailbox relaying OS events to a single host callback
//! - The WinRT backend, COM activator and AUMID registration (Windows only)

pub mod aumid;
pub mod backend;
pub mod dispatch;
pub mod event;
pub mod launch_args;
pub mod manager;
pub mod notification;
pub mod permission;
pub mod registry;
pub mod router;
pub mod toast_xml;
#[cfg(windows)]
pub mod winrt;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{ToastBackend, ToastPayload};
pub use dispatch::{Dispatcher, EventMailbox, NotificationCallback};
pub use event::{DismissalReason, NotificationEvent, NotificationEventKind};
pub use manager::DesktopNotificationsManager;
pub use notification::DesktopNotification;
pub use permission::{DesktopNotificationPermission, NotificationSetting};
pub use router::EventRouter;
#[cfg(windows)]
pub use winrt::WinRtBackend;

/// Windows settings page for notifications.
pub const NOTIFICATION_SETTINGS_URL: &str = "ms-settings:notifications";

/// Whether toast notifications can be shown on this platform.
pub fn supports_notifications() -> bool {
    cfg!(windows)
}
