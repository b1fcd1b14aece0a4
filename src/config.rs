use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{NotificationError, Result};

/// Overrides the process's App User Model ID.
pub const APP_ID_ENV: &str = "DN_APP_ID";
/// CLSID the toast activator is published under.
pub const ACTIVATOR_CLSID_ENV: &str = "DN_TOAST_ACTIVATOR_CLSID";
pub const GROUP_NAME_ENV: &str = "DN_GROUP_NAME";
pub const DISPLAY_NAME_ENV: &str = "DN_DISPLAY_NAME";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsConfig {
    pub toast_activator_clsid: Uuid,
    /// Explicit App User Model ID; the process's current one is used if unset.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Toast group every notification is filed under.
    #[serde(default = "default_group_name")]
    pub group_name: String,
    /// Name shown on toasts when the app id is registered per-user.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
    #[serde(default = "default_register_activator")]
    pub register_activator: bool,
}

fn default_group_name() -> String {
    "desktop-notifications".to_string()
}

fn default_register_activator() -> bool {
    true
}

impl NotificationsConfig {
    pub fn new(toast_activator_clsid: Uuid) -> Self {
        Self {
            toast_activator_clsid,
            app_id: None,
            group_name: default_group_name(),
            display_name: None,
            icon_path: None,
            register_activator: default_register_activator(),
        }
    }

    /// Build from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), falling back to `clsid` when the
    /// environment does not name the activator CLSID.
    pub fn from_env_or_clsid(clsid: Option<&str>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(with_clsid_fallback(|key| std::env::var(key).ok(), clsid))
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let clsid = get(ACTIVATOR_CLSID_ENV).ok_or_else(|| {
            NotificationError::Config(format!("{} is not set", ACTIVATOR_CLSID_ENV))
        })?;

        let mut config = Self::new(Self::parse_clsid(&clsid)?);
        config.app_id = get(APP_ID_ENV);
        if let Some(group) = get(GROUP_NAME_ENV) {
            config.group_name = group;
        }
        config.display_name = get(DISPLAY_NAME_ENV);
        Ok(config)
    }

    /// Parse a CLSID, with or without braces.
    pub fn parse_clsid(value: &str) -> Result<Uuid> {
        Uuid::parse_str(value.trim())
            .map_err(|e| NotificationError::Config(format!("Invalid CLSID '{}': {}", value, e)))
    }

    /// The CLSID in registry form: `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.
    pub fn braced_clsid(&self) -> String {
        format!("{{{}}}", self.toast_activator_clsid.hyphenated()).to_uppercase()
    }
}

fn with_clsid_fallback<'a, F>(lookup: F, clsid: Option<&'a str>) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key: &str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| match key {
                ACTIVATOR_CLSID_ENV => clsid.map(str::to_string),
                _ => None,
            })
    }
}
