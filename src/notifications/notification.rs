use super::backend::{ToastBackend, ToastPayload};
use super::launch_args;
use super::registry::Identified;
use super::router::EventRouter;
use super::toast_xml;
use crate::error::Result;

/// One toast shown by this process.
pub struct DesktopNotification<H> {
    id: String,
    app_id: String,
    title: String,
    body: String,
    user_info: String,
    handle: Option<H>,
}

impl<H> DesktopNotification<H> {
    pub fn new(id: &str, app_id: &str, title: &str, body: &str, user_info: &str) -> Self {
        Self {
            id: id.to_string(),
            app_id: app_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            user_info: user_info.to_string(),
            handle: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the OS accepted the toast.
    pub fn is_shown(&self) -> bool {
        self.handle.is_some()
    }

    /// Build the toast XML and display it.
    ///
    /// `route_activation` attaches the in-process click handler; leave it off
    /// when the activator delivers clicks.
    pub fn create_toast<B>(
        &mut self,
        backend: &B,
        group: &str,
        router: &EventRouter,
        route_activation: bool,
    ) -> Result<()>
    where
        B: ToastBackend<Toast = H>,
    {
        let template = backend.template()?;
        let launch = launch_args::encode(&self.id, &self.user_info);
        let xml = toast_xml::populate(&template, &self.title, &self.body, &launch)?;
        tracing::trace!("Toast XML for {}: {}", self.id, xml);

        self.check_setting(backend);

        let payload = ToastPayload {
            xml: &xml,
            tag: &self.id,
            group,
            route_activation,
        };
        self.handle = Some(backend.show(&self.app_id, &payload, router)?);
        tracing::info!("Notification {} shown", self.id);
        Ok(())
    }

    /// Logs why notifications are off. Display is still attempted; the OS
    /// enforces the policy.
    fn check_setting<B: ToastBackend>(&self, backend: &B) {
        let setting = match backend.setting(&self.app_id) {
            Ok(setting) => setting,
            Err(e) => {
                tracing::error!(
                    "Failed to retrieve NotificationSettings, ensure your appId is registered: {}",
                    e
                );
                return;
            }
        };

        if let Some(reason) = setting.disabled_reason() {
            tracing::error!(
                "Notifications are disabled\nReason: {} Please make sure that the app id is set correctly.\nCommand Line: {}",
                reason,
                std::env::args().collect::<Vec<_>>().join(" ")
            );
        }
    }

    /// Notification id carried by a toast's XML content.
    pub fn notification_id_from_toast(xml: &str) -> Option<String> {
        let launch = launch_args_from_toast(xml)?;
        launch_args::parse_notification_id(&launch)
    }

    /// User-info carried by a toast's XML content; empty if absent.
    pub fn user_info_from_toast(xml: &str) -> String {
        match launch_args_from_toast(xml) {
            Some(launch) => launch_args::parse_user_info(&launch),
            None => String::new(),
        }
    }
}

impl<H> Identified for DesktopNotification<H> {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The `launch` attribute of a toast's XML content.
pub fn launch_args_from_toast(xml: &str) -> Option<String> {
    match toast_xml::launch_attribute(xml) {
        Ok(Some(launch)) => Some(launch),
        Ok(None) => {
            tracing::error!("Could not get launch attribute from toast");
            None
        }
        Err(e) => {
            tracing::error!("Could not read toast XML: {}", e);
            None
        }
    }
}
