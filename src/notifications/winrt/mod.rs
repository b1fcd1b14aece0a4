//! WinRT implementation of [`ToastBackend`].

mod activator;

use parking_lot::Mutex;
use uuid::Uuid;
use windows::core::{IInspectable, Interface, GUID, HSTRING, PCWSTR};
use windows::Data::Xml::Dom::XmlDocument;
use windows::Foundation::TypedEventHandler;
use windows::UI::Notifications::{
    ToastActivatedEventArgs,
    ToastDismissedEventArgs, ToastFailedEventArgs, ToastNotification, ToastNotificationManager,
    ToastNotifier, ToastTemplateType,
};
use windows::Win32::System::Com::{
    CoRegisterClassObject, CoRevokeClassObject, CoTaskMemFree, CLSCTX_LOCAL_SERVER,
    REGCLS_MULTIPLEUSE,
};
use windows::Win32::System::WinRT::{RoInitialize, RO_INIT_MULTITHREADED};
use windows::Win32::UI::Shell::{
    GetCurrentProcessExplicitAppUserModelID, SetCurrentProcessExplicitAppUserModelID,
};

use self::activator::ActivatorFactory;
use super::backend::{ToastBackend, ToastPayload};
use super::event::DismissalReason;
use super::notification::launch_args_from_toast;
use super::permission::NotificationSetting;
use super::router::EventRouter;
use crate::error::{NotificationError, Result};

fn win_err(context: &'static str) -> impl FnOnce(windows::core::Error) -> NotificationError {
    move |e| NotificationError::Os {
        context: context.to_string(),
        code: e.code().0,
        message: e.message().to_string(),
    }
}

/// A toast handed to the OS, with the notifier that showed it.
pub struct WinToast {
    pub notifier: ToastNotifier,
    pub notification: ToastNotification,
}

pub struct WinRtBackend {
    activator_cookie: Mutex<Option<u32>>,
}

impl WinRtBackend {
    /// Initializes the Windows Runtime for multithreaded use on this thread.
    pub fn new() -> Self {
        if let Err(e) = unsafe { RoInitialize(RO_INIT_MULTITHREADED) } {
            tracing::error!(
                "Failed to initialize with RO_INIT_MULTITHREADED: {} (0x{:08X})",
                e.message(),
                e.code().0
            );
        }

        Self {
            activator_cookie: Mutex::new(None),
        }
    }

    fn notifier(app_id: &str) -> Result<ToastNotifier> {
        ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(app_id))
            .map_err(win_err("CreateToastNotifierWithId"))
    }

    fn attach_handlers(
        toast: &ToastNotification,
        router: &EventRouter,
        route_activation: bool,
    ) -> Result<()> {
        if route_activation {
            Self::attach_activated(toast, router)?;
        }

        let on_dismissed = router.clone();
        toast
            .Dismissed(&TypedEventHandler::new(
                move |sender: &Option<ToastNotification>, args: &Option<ToastDismissedEventArgs>| {
                    let reason = match args.as_ref().map(|args| args.Reason()) {
                        Some(Ok(reason)) => DismissalReason::from_raw(reason.0),
                        _ => {
                            tracing::error!("Could not get the dismissal reason");
                            return Ok(());
                        }
                    };
                    on_dismissed.dismissed(launch_args_of(sender).as_deref(), reason);
                    Ok(())
                },
            ))
            .map_err(win_err("add_Dismissed"))?;

        let on_failed = router.clone();
        toast
            .Failed(&TypedEventHandler::new(
                move |sender: &Option<ToastNotification>, args: &Option<ToastFailedEventArgs>| {
                    let code = args
                        .as_ref()
                        .and_then(|args| args.ErrorCode().ok())
                        .map(|hr| hr.0)
                        .unwrap_or(crate::error::E_FAIL);
                    on_failed.failed(launch_args_of(sender).as_deref(), code);
                    Ok(())
                },
            ))
            .map_err(win_err("add_Failed"))?;

        Ok(())
    }

    fn attach_activated(toast: &ToastNotification, router: &EventRouter) -> Result<()> {
        let on_activated = router.clone();
        toast
            .Activated(&TypedEventHandler::new(
                move |sender: &Option<ToastNotification>, args: &Option<IInspectable>| {
                    let activated = args
                        .as_ref()
                        .and_then(|args| args.cast::<ToastActivatedEventArgs>().ok());
                    if activated.is_none() {
                        tracing::error!("args is not a ToastActivatedEventArgs");
                        return Ok(());
                    }
                    on_activated.activated(launch_args_of(sender).as_deref());
                    Ok(())
                },
            ))
            .map_err(win_err("add_Activated"))?;
        Ok(())
    }
}

impl Default for WinRtBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Launch arguments of a toast received from an OS event.
fn launch_args_of(toast: &Option<ToastNotification>) -> Option<String> {
    let Some(toast) = toast else {
        tracing::error!("Event has no sender toast");
        return None;
    };

    let xml = match toast.Content().and_then(|content| content.GetXml()) {
        Ok(xml) => xml.to_string(),
        Err(e) => {
            tracing::error!("Could not get xml document from toast: {}", e.message());
            return None;
        }
    };
    launch_args_from_toast(&xml)
}

impl ToastBackend for WinRtBackend {
    type Toast = WinToast;

    fn resolve_app_id(&self, override_id: Option<&str>) -> Result<String> {
        if let Some(app_id) = override_id {
            let app_id = HSTRING::from(app_id);
            unsafe { SetCurrentProcessExplicitAppUserModelID(PCWSTR(app_id.as_ptr())) }
                .map_err(win_err("SetCurrentProcessExplicitAppUserModelID"))?;
        }

        let raw = unsafe { GetCurrentProcessExplicitAppUserModelID() }
            .map_err(win_err("GetCurrentProcessExplicitAppUserModelID"))?;
        let app_id = unsafe { raw.to_string() };
        unsafe { CoTaskMemFree(Some(raw.0 as *const _)) };

        app_id.map_err(|e| NotificationError::Other(format!("AUMID is not valid UTF-16: {}", e)))
    }

    fn template(&self) -> Result<String> {
        let template = ToastNotificationManager::GetTemplateContent(ToastTemplateType::ToastImageAndText02)
            .map_err(win_err("GetTemplateContent"))?;
        let xml = template.GetXml().map_err(win_err("GetXml"))?;
        Ok(xml.to_string())
    }

    fn setting(&self, app_id: &str) -> Result<NotificationSetting> {
        let setting = Self::notifier(app_id)?
            .Setting()
            .map_err(win_err("get_Setting"))?;

        NotificationSetting::from_raw(setting.0)
    }

    fn show(&self, app_id: &str, payload: &ToastPayload<'_>, router: &EventRouter) -> Result<WinToast> {
        let document = XmlDocument::new().map_err(win_err("XmlDocument"))?;
        document
            .LoadXml(&HSTRING::from(payload.xml))
            .map_err(win_err("LoadXml"))?;

        let notifier = Self::notifier(app_id)?;
        let notification = ToastNotification::CreateToastNotification(&document)
            .map_err(win_err("CreateToastNotification"))?;
        notification
            .SetTag(&HSTRING::from(payload.tag))
            .map_err(win_err("put_Tag"))?;
        notification
            .SetGroup(&HSTRING::from(payload.group))
            .map_err(win_err("put_Group"))?;

        Self::attach_handlers(&notification, router, payload.route_activation)?;

        notifier.Show(&notification).map_err(win_err("Show"))?;
        Ok(WinToast {
            notifier,
            notification,
        })
    }

    fn remove_grouped_tag(&self, app_id: &str, tag: &str, group: &str) -> Result<()> {
        let history = ToastNotificationManager::History().map_err(win_err("get_History"))?;
        history
            .RemoveGroupedTagWithId(&HSTRING::from(tag), &HSTRING::from(group), &HSTRING::from(app_id))
            .map_err(win_err("RemoveGroupedTagWithId"))
    }

    fn register_activator(&self, clsid: Uuid, router: EventRouter) -> Result<()> {
        let mut cookie = self.activator_cookie.lock();
        if cookie.is_some() {
            return Err(NotificationError::Other(
                "Toast activator is already registered".to_string(),
            ));
        }

        let factory: windows::core::IUnknown = ActivatorFactory::new(router).into();
        let registration = unsafe {
            CoRegisterClassObject(
                &GUID::from_u128(clsid.as_u128()),
                &factory,
                CLSCTX_LOCAL_SERVER,
                REGCLS_MULTIPLEUSE,
            )
        }
        .map_err(win_err("CoRegisterClassObject"))?;

        *cookie = Some(registration);
        Ok(())
    }

    fn unregister_activator(&self) -> Result<()> {
        match self.activator_cookie.lock().take() {
            Some(registration) => unsafe { CoRevokeClassObject(registration) }
                .map_err(win_err("CoRevokeClassObject")),
            None => Ok(()),
        }
    }
}
