//! Windows toast notifications for Tauri apps.
//!
//! Shows toasts through the WinRT `ToastNotificationManager`, tracks them so
//! they can be closed from Action Center, and relays activation, dismissal
//! and failure events (including COM activations after a cold start) to a
//! single host callback.

#[cfg(windows)]
pub mod commands;
pub mod config;
pub mod error;
pub mod notifications;
#[cfg(windows)]
pub mod state;

pub use config::NotificationsConfig;
pub use error::{NotificationError, Result};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a `tracing` subscriber honoring `RUST_LOG`.
///
/// Does nothing if the host already installed one.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "desktop_notifications=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Tauri plugin that owns the notification manager for the app's lifetime.
///
/// The manager is built during plugin setup and torn down on exit. Commands
/// live in [`commands::notification`]; events are emitted to the webview as
/// [`state::NOTIFICATION_EVENT`].
#[cfg(windows)]
pub fn init<R: tauri::Runtime>(config: NotificationsConfig) -> tauri::plugin::TauriPlugin<R> {
    use tauri::Manager;

    tauri::plugin::Builder::new("desktop-notifications")
        .setup(move |app, _api| {
            let state = state::NotificationsState::initialize(app, &config);
            app.manage(state);
            Ok(())
        })
        .on_event(|app, event| {
            if let tauri::RunEvent::Exit = event {
                if let Some(state) = app.try_state::<state::NotificationsState>() {
                    state.terminate();
                }
            }
        })
        .build()
}
