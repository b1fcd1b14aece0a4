//! Event sink for OS toast events.
//!
//! Both the in-process toast handlers and the out-of-process COM activator
//! land here. Every piece of state needed to address the host comes from the
//! launch arguments, so events for toasts shown by an earlier process are
//! handled the same way as live ones.

use super::dispatch::EventMailbox;
use super::event::{DismissalReason, NotificationEvent, NotificationEventKind};
use super::launch_args::{self, LaunchArgs};

#[derive(Clone)]
pub struct EventRouter {
    mailbox: EventMailbox,
}

impl EventRouter {
    pub fn new(mailbox: EventMailbox) -> Self {
        Self { mailbox }
    }

    /// A live toast was activated (clicked).
    pub fn activated(&self, launch: Option<&str>) {
        if let Some(args) = decode(launch) {
            self.deliver(NotificationEventKind::Click, args);
        }
    }

    /// A live toast left the screen.
    pub fn dismissed(&self, launch: Option<&str>, reason: DismissalReason) {
        let Some(args) = decode(launch) else {
            return;
        };

        match reason.event_kind() {
            Some(kind) => self.deliver(kind, args),
            None => tracing::debug!(
                "Ignoring dismissal of {} with unmapped reason {:?}",
                args.notification_id,
                reason
            ),
        }
    }

    /// The OS failed to raise a toast.
    pub fn failed(&self, launch: Option<&str>, error_code: i32) {
        let Some(args) = decode(launch) else {
            return;
        };

        tracing::error!(
            "The toast {} encountered an error (0x{:08X})",
            args.notification_id,
            error_code
        );
        self.deliver(NotificationEventKind::Error, args);
    }

    /// The COM activator was invoked with the raw launch string.
    pub fn activator(&self, launch: &str) {
        tracing::info!("Toast activator invoked");
        self.activated(Some(launch));
    }

    pub fn close(&self) {
        self.mailbox.close();
    }

    fn deliver(&self, kind: NotificationEventKind, args: LaunchArgs) {
        let event = NotificationEvent::new(kind, args.notification_id, &args.user_info);
        self.mailbox.post(event);
    }
}

fn decode(launch: Option<&str>) -> Option<LaunchArgs> {
    let Some(launch) = launch.filter(|l| !l.is_empty()) else {
        tracing::error!("Could not get launch arguments from toast");
        return None;
    };

    match launch_args::decode(launch) {
        Ok(args) if args.notification_id.is_empty() => {
            tracing::error!("Could not get notification ID from toast");
            None
        }
        Ok(args) => Some(args),
        Err(e) => {
            tracing::error!("Could not decode launch arguments '{}': {}", launch, e);
            None
        }
    }
}
