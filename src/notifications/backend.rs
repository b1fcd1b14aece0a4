use uuid::Uuid;

use super::permission::NotificationSetting;
use super::router::EventRouter;
use crate::error::Result;

/// A toast ready to be handed to the OS.
#[derive(Debug, Clone, Copy)]
pub struct ToastPayload<'a> {
    pub xml: &'a str,
    pub tag: &'a str,
    pub group: &'a str,
    /// Route `Activated` from the toast itself. Off while the out-of-process
    /// activator is registered, since it already delivers clicks.
    pub route_activation: bool,
}

/// The operating system's notification service.
///
/// Implemented over WinRT on Windows (`winrt::WinRtBackend`).
pub trait ToastBackend: Send + Sync + 'static {
    /// Handle kept alive for as long as the toast is tracked.
    type Toast: Send + 'static;

    /// Apply `override_id` as the process app id if given, then return the
    /// app id the process ends up with.
    fn resolve_app_id(&self, override_id: Option<&str>) -> Result<String>;

    /// The two-line toast template, serialized.
    fn template(&self) -> Result<String>;

    fn setting(&self, app_id: &str) -> Result<NotificationSetting>;

    /// Show the toast, routing its dismissal and failure events (and its
    /// activation, if `payload.route_activation`) to `router`.
    fn show(&self, app_id: &str, payload: &ToastPayload<'_>, router: &EventRouter)
        -> Result<Self::Toast>;

    /// Remove the (tag, group) entry of `app_id` from the notification history.
    fn remove_grouped_tag(&self, app_id: &str, tag: &str, group: &str) -> Result<()>;

    /// Publish the out-of-process activator under `clsid`.
    fn register_activator(&self, clsid: Uuid, router: EventRouter) -> Result<()>;

    fn unregister_activator(&self) -> Result<()>;
}
