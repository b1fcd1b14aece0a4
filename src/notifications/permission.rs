use serde::{Deserialize, Serialize};

use crate::error::{NotificationError, Result};

/// Notification setting reported by the OS for an app id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSetting {
    Enabled,
    DisabledForApplication,
    DisabledForUser,
    DisabledByGroupPolicy,
    DisabledByManifest,
}

impl NotificationSetting {
    /// Map the raw `Windows.UI.Notifications.NotificationSetting` value.
    ///
    /// Values this crate does not know about are errors, not `Enabled`.
    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(NotificationSetting::Enabled),
            1 => Ok(NotificationSetting::DisabledForApplication),
            2 => Ok(NotificationSetting::DisabledForUser),
            3 => Ok(NotificationSetting::DisabledByGroupPolicy),
            4 => Ok(NotificationSetting::DisabledByManifest),
            other => Err(NotificationError::Other(format!(
                "Unknown notification setting {}",
                other
            ))),
        }
    }

    /// Why notifications are disabled, or `None` when they are enabled.
    pub fn disabled_reason(&self) -> Option<&'static str> {
        match self {
            NotificationSetting::Enabled => None,
            NotificationSetting::DisabledForApplication => Some("DisabledForApplication"),
            NotificationSetting::DisabledForUser => Some("DisabledForUser"),
            NotificationSetting::DisabledByGroupPolicy => Some("DisabledByGroupPolicy"),
            NotificationSetting::DisabledByManifest => Some("DisabledByManifest"),
        }
    }
}

/// Permission as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopNotificationPermission {
    Granted,
    Denied,
    /// The setting could not be queried.
    Default,
}

impl DesktopNotificationPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesktopNotificationPermission::Granted => "granted",
            DesktopNotificationPermission::Denied => "denied",
            DesktopNotificationPermission::Default => "default",
        }
    }
}

impl From<NotificationSetting> for DesktopNotificationPermission {
    fn from(setting: NotificationSetting) -> Self {
        match setting {
            NotificationSetting::Enabled => DesktopNotificationPermission::Granted,
            _ => DesktopNotificationPermission::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_to_permission() {
        assert_eq!(
            DesktopNotificationPermission::from(NotificationSetting::Enabled),
            DesktopNotificationPermission::Granted
        );
        for setting in [
            NotificationSetting::DisabledForApplication,
            NotificationSetting::DisabledForUser,
            NotificationSetting::DisabledByGroupPolicy,
            NotificationSetting::DisabledByManifest,
        ] {
            assert_eq!(
                DesktopNotificationPermission::from(setting),
                DesktopNotificationPermission::Denied
            );
            assert!(setting.disabled_reason().is_some());
        }
        assert_eq!(NotificationSetting::Enabled.disabled_reason(), None);
    }

    #[test]
    fn test_setting_from_raw() {
        assert_eq!(NotificationSetting::from_raw(0).unwrap(), NotificationSetting::Enabled);
        assert_eq!(
            NotificationSetting::from_raw(4).unwrap(),
            NotificationSetting::DisabledByManifest
        );
        assert!(matches!(
            NotificationSetting::from_raw(5),
            Err(NotificationError::Other(_))
        ));
        assert!(NotificationSetting::from_raw(-1).is_err());
    }

    #[test]
    fn test_permission_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DesktopNotificationPermission::Default).unwrap(),
            "\"default\""
        );
        assert_eq!(DesktopNotificationPermission::Granted.as_str(), "granted");
    }
}
