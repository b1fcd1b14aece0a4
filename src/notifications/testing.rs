//! In-memory `ToastBackend` and XML helpers for tests.

use std::sync::Arc;

use parking_lot::Mutex;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;
use uuid::Uuid;

use super::backend::{ToastBackend, ToastPayload};
use super::event::DismissalReason;
use super::notification::launch_args_from_toast;
use super::permission::NotificationSetting;
use super::router::EventRouter;
use super::toast_xml::TEXT_ELEMENT;
use crate::error::{NotificationError, Result};

/// What `ToastNotificationManager::GetTemplateContent(ToastImageAndText02)` returns.
pub const TOAST_IMAGE_AND_TEXT_02: &str = r#"<toast><visual><binding template="ToastImageAndText02"><image id="1" src=""/><text id="1"></text><text id="2"></text></binding></visual></toast>"#;

/// Contents of every `<text>` element, in document order.
pub fn text_values(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == TEXT_ELEMENT.as_bytes() => {
                let raw = reader.read_text(e.name()).unwrap();
                values.push(unescape(&raw).unwrap().into_owned());
            }
            Event::Empty(e) if e.name().as_ref() == TEXT_ELEMENT.as_bytes() => {
                values.push(String::new());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    values
}

fn os_error(context: &str, code: i32) -> NotificationError {
    NotificationError::Os {
        context: context.to_string(),
        code,
        message: "fake failure".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct ShownToast {
    pub app_id: String,
    pub xml: String,
    pub tag: String,
    pub group: String,
    pub route_activation: bool,
}

#[derive(Default)]
struct FakeState {
    shown: Vec<ShownToast>,
    routers: Vec<EventRouter>,
    removed: Vec<(String, String, String)>,
    registered: Option<Uuid>,
    activator: Option<EventRouter>,
    unregistered: bool,
}

/// Records everything it is asked to do. Clones share state.
#[derive(Clone)]
pub struct FakeBackend {
    template: String,
    setting: std::result::Result<NotificationSetting, i32>,
    raw_setting: Option<i32>,
    app_id_error: Option<i32>,
    show_error: Option<i32>,
    remove_error: Option<i32>,
    register_error: Option<i32>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub const APP_ID: &'static str = "com.example.desktop";

    pub fn new() -> Self {
        Self {
            template: TOAST_IMAGE_AND_TEXT_02.to_string(),
            setting: Ok(NotificationSetting::Enabled),
            raw_setting: None,
            app_id_error: None,
            show_error: None,
            remove_error: None,
            register_error: None,
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    pub fn with_setting(mut self, setting: std::result::Result<NotificationSetting, i32>) -> Self {
        self.setting = setting;
        self
    }

    /// Report `raw` as the OS setting value, as WinRT would.
    pub fn with_raw_setting(mut self, raw: i32) -> Self {
        self.raw_setting = Some(raw);
        self
    }

    pub fn with_app_id_error(mut self, code: i32) -> Self {
        self.app_id_error = Some(code);
        self
    }

    pub fn with_show_error(mut self, code: i32) -> Self {
        self.show_error = Some(code);
        self
    }

    pub fn with_remove_error(mut self, code: i32) -> Self {
        self.remove_error = Some(code);
        self
    }

    pub fn with_register_error(mut self, code: i32) -> Self {
        self.register_error = Some(code);
        self
    }

    pub fn shown(&self) -> Vec<ShownToast> {
        self.state.lock().shown.clone()
    }

    pub fn removed(&self) -> Vec<(String, String, String)> {
        self.state.lock().removed.clone()
    }

    pub fn registered_clsid(&self) -> Option<Uuid> {
        self.state.lock().registered
    }

    pub fn unregistered(&self) -> bool {
        self.state.lock().unregistered
    }

    fn live(&self, index: usize) -> (Option<String>, EventRouter) {
        let state = self.state.lock();
        let launch = launch_args_from_toast(&state.shown[index].xml);
        (launch, state.routers[index].clone())
    }

    /// Simulate the OS raising `Activated` on the `index`-th shown toast.
    /// Nothing is delivered unless the toast was shown with a click handler.
    pub fn fire_activated(&self, index: usize) {
        if !self.state.lock().shown[index].route_activation {
            return;
        }
        let (launch, router) = self.live(index);
        router.activated(launch.as_deref());
    }

    pub fn fire_dismissed(&self, index: usize, reason: DismissalReason) {
        let (launch, router) = self.live(index);
        router.dismissed(launch.as_deref(), reason);
    }

    pub fn fire_failed(&self, index: usize, code: i32) {
        let (launch, router) = self.live(index);
        router.failed(launch.as_deref(), code);
    }

    /// Simulate COM invoking the registered activator.
    pub fn fire_activator(&self, launch: &str) {
        let router = self.state.lock().activator.clone();
        if let Some(router) = router {
            router.activator(launch);
        }
    }
}

impl ToastBackend for FakeBackend {
    type Toast = usize;

    fn resolve_app_id(&self, override_id: Option<&str>) -> Result<String> {
        if let Some(code) = self.app_id_error {
            return Err(os_error("GetCurrentProcessExplicitAppUserModelID", code));
        }
        Ok(override_id.unwrap_or(Self::APP_ID).to_string())
    }

    fn template(&self) -> Result<String> {
        Ok(self.template.clone())
    }

    fn setting(&self, _app_id: &str) -> Result<NotificationSetting> {
        if let Some(raw) = self.raw_setting {
            return NotificationSetting::from_raw(raw);
        }
        self.setting.map_err(|code| os_error("get_Setting", code))
    }

    fn show(&self, app_id: &str, payload: &ToastPayload<'_>, router: &EventRouter) -> Result<usize> {
        if let Some(code) = self.show_error {
            return Err(os_error("Show", code));
        }
        let mut state = self.state.lock();
        state.shown.push(ShownToast {
            app_id: app_id.to_string(),
            xml: payload.xml.to_string(),
            tag: payload.tag.to_string(),
            group: payload.group.to_string(),
            route_activation: payload.route_activation,
        });
        state.routers.push(router.clone());
        Ok(state.shown.len() - 1)
    }

    fn remove_grouped_tag(&self, app_id: &str, tag: &str, group: &str) -> Result<()> {
        if let Some(code) = self.remove_error {
            return Err(os_error("RemoveGroupedTagWithId", code));
        }
        self.state
            .lock()
            .removed
            .push((app_id.to_string(), tag.to_string(), group.to_string()));
        Ok(())
    }

    fn register_activator(&self, clsid: Uuid, router: EventRouter) -> Result<()> {
        if let Some(code) = self.register_error {
            return Err(os_error("CoRegisterClassObject", code));
        }
        let mut state = self.state.lock();
        state.registered = Some(clsid);
        state.activator = Some(router);
        Ok(())
    }

    fn unregister_activator(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.unregistered = true;
        state.activator = None;
        Ok(())
    }
}
