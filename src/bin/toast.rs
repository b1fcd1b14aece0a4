//! Shows a toast and prints the events it produces.
//!
//! ```text
//! toast <id> <title> <body> [userInfoJson]
//! ```
//!
//! Reads its configuration from the environment (`DN_TOAST_ACTIVATOR_CLSID`,
//! `DN_APP_ID`, ...). When COM starts it to deliver an activation it only
//! serves the activator, prints the click and exits; the CLSID then comes
//! from the registered command line if the environment lacks it.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    desktop_notifications::init_tracing();
    run().await
}

#[cfg(not(windows))]
async fn run() -> anyhow::Result<()> {
    anyhow::bail!("Toast notifications are only supported on Windows")
}

#[cfg(windows)]
async fn run() -> anyhow::Result<()> {
    use anyhow::Context;
    use desktop_notifications::notifications::{
        aumid, DesktopNotificationsManager, Dispatcher, NotificationEvent, WinRtBackend,
    };
    use desktop_notifications::NotificationsConfig;
    use tokio::sync::mpsc;

    let args: Vec<String> = std::env::args().collect();
    let activation_launch = aumid::is_activation_launch(&args);
    let config =
        NotificationsConfig::from_env_or_clsid(aumid::activator_clsid_arg(&args).as_deref())?;

    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let (mailbox, dispatcher) = Dispatcher::new(move |event: &NotificationEvent| {
        match serde_json::to_string(event) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("Could not serialize event: {}", e),
        }
        if seen_tx.send(event.event).is_err() {
            tracing::debug!("No longer waiting for events, '{}' for {} not signalled", event.event, event.id);
        }
    });
    let dispatcher = tokio::spawn(dispatcher.run());

    let manager = DesktopNotificationsManager::new(WinRtBackend::new(), &config, mailbox);
    tracing::info!(
        "Notifications permission: {}",
        manager.current_permission().as_str()
    );

    if activation_launch {
        tracing::info!("Started by COM, waiting for the activation");
        tokio::select! {
            _ = seen_rx.recv() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    } else {
        let id = args.get(1).context("missing <id>")?;
        let title = args.get(2).context("missing <title>")?;
        let body = args.get(3).context("missing <body>")?;
        let user_info = args.get(4).map(String::as_str).unwrap_or("");
        if !user_info.is_empty() {
            serde_json::from_str::<serde_json::Value>(user_info)
                .context("userInfoJson is not valid JSON")?;
        }

        let exe = std::env::current_exe()?;
        if let Err(e) = aumid::ensure_activator_registered(manager.app_id(), &config, &exe) {
            tracing::warn!("AUMID registration failed: {}", e);
        }

        manager
            .display_toast(id, title, body, user_info)
            .with_context(|| format!("failed to show notification {}", id))?;
        tracing::info!("Waiting for events, press Ctrl-C to close the toast and exit");

        tokio::signal::ctrl_c().await?;
        if !manager.close_toast(id) {
            tracing::warn!("close_toast({}) failed", id);
        }
    }

    drop(manager);
    dispatcher.await?;
    Ok(())
}
