//! Out-of-process toast activator.
//!
//! COM instantiates [`ToastActivator`] through [`ActivatorFactory`] when the
//! user interacts with a toast from Action Center, including after the
//! process that showed it has exited and been relaunched by COM.

use std::ffi::c_void;

use windows::core::{implement, IUnknown, Interface, Result, GUID, PCWSTR};
use windows::Win32::Foundation::{BOOL, CLASS_E_NOAGGREGATION, E_POINTER};
use windows::Win32::System::Com::{IClassFactory, IClassFactory_Impl};
use windows::Win32::UI::Notifications::{
    INotificationActivationCallback, INotificationActivationCallback_Impl,
    NOTIFICATION_USER_INPUT_DATA,
};

use crate::notifications::router::EventRouter;

#[implement(INotificationActivationCallback)]
pub struct ToastActivator {
    router: EventRouter,
}

impl INotificationActivationCallback_Impl for ToastActivator_Impl {
    fn Activate(
        &self,
        _appusermodelid: &PCWSTR,
        invokedargs: &PCWSTR,
        _data: *const NOTIFICATION_USER_INPUT_DATA,
        _count: u32,
    ) -> Result<()> {
        let launch_args = if invokedargs.is_null() {
            String::new()
        } else {
            unsafe { invokedargs.to_string() }.unwrap_or_default()
        };

        self.router.activator(&launch_args);
        Ok(())
    }
}

#[implement(IClassFactory)]
pub struct ActivatorFactory {
    router: EventRouter,
}

impl ActivatorFactory {
    pub fn new(router: EventRouter) -> Self {
        Self { router }
    }
}

impl IClassFactory_Impl for ActivatorFactory_Impl {
    fn CreateInstance(
        &self,
        punkouter: Option<&IUnknown>,
        riid: *const GUID,
        ppvobject: *mut *mut c_void,
    ) -> Result<()> {
        if ppvobject.is_null() {
            return Err(E_POINTER.into());
        }
        unsafe { *ppvobject = std::ptr::null_mut() };

        if punkouter.is_some() {
            return Err(CLASS_E_NOAGGREGATION.into());
        }

        let activator: INotificationActivationCallback = ToastActivator {
            router: self.router.clone(),
        }
        .into();
        unsafe { activator.query(riid, ppvobject).ok() }
    }

    fn LockServer(&self, _flock: BOOL) -> Result<()> {
        Ok(())
    }
}
