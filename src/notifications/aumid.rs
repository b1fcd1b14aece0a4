//! Per-user AUMID (Application User Model ID) and activator registration.
//!
//! An unpackaged Win32 app only gets toast activations routed back to it when
//! its AUMID names a custom activator CLSID and that CLSID points at a local
//! server. Without these keys the toast still shows, but clicks on it after
//! the app has exited go nowhere.

use std::path::Path;

/// Command-line flag passed to the local server when COM starts it.
pub const ACTIVATION_FLAG: &str = "-ToastActivated";
/// Flag COM adds for local servers started without an explicit command line.
pub const EMBEDDING_FLAG: &str = "-Embedding";
/// Followed by the braced activator CLSID on the local server command line,
/// so a process started by COM does not depend on its environment.
pub const CLSID_FLAG: &str = "-ToastActivatorClsid";

/// `HKEY_CURRENT_USER` relative key holding the AUMID properties.
pub fn aumid_key_path(app_id: &str) -> String {
    format!(r"Software\Classes\AppUserModelId\{}", app_id)
}

/// `HKEY_CURRENT_USER` relative key of the activator's local server.
pub fn local_server_key_path(braced_clsid: &str) -> String {
    format!(r"Software\Classes\CLSID\{}\LocalServer32", braced_clsid)
}

pub fn local_server_command(exe: &Path, braced_clsid: &str) -> String {
    format!(
        "\"{}\" {} {} {}",
        exe.display(),
        ACTIVATION_FLAG,
        CLSID_FLAG,
        braced_clsid
    )
}

/// The CLSID following [`CLSID_FLAG`], if the command line carries one.
pub fn activator_clsid_arg<I, S>(args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    args.by_ref()
        .find(|arg| arg.as_ref().eq_ignore_ascii_case(CLSID_FLAG))?;
    args.next().map(|clsid| clsid.as_ref().to_string())
}

/// Whether the process was started by COM to deliver a toast activation.
pub fn is_activation_launch<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().any(|arg| {
        let arg = arg.as_ref();
        arg.eq_ignore_ascii_case(ACTIVATION_FLAG) || arg.eq_ignore_ascii_case(EMBEDDING_FLAG)
    })
}

/// Ensures the AUMID and its activator are registered in the Windows Registry.
///
/// Creates:
/// - `HKEY_CURRENT_USER\Software\Classes\AppUserModelId\<app_id>` with
///   `DisplayName`, `IconUri` (when the icon exists) and `CustomActivator`
/// - `HKEY_CURRENT_USER\Software\Classes\CLSID\<clsid>\LocalServer32` whose
///   default value starts `exe` with [`ACTIVATION_FLAG`] and the CLSID
#[cfg(windows)]
pub fn ensure_activator_registered(
    app_id: &str,
    config: &crate::config::NotificationsConfig,
    exe: &Path,
) -> crate::error::Result<()> {
    use winreg::enums::*;
    use winreg::RegKey;

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let braced_clsid = config.braced_clsid();

    let path = aumid_key_path(app_id);
    let (key, disposition) = hkcu.create_subkey(&path)?;
    let action = match disposition {
        winreg::enums::RegDisposition::REG_CREATED_NEW_KEY => "Created",
        winreg::enums::RegDisposition::REG_OPENED_EXISTING_KEY => "Updated",
    };

    let display_name = config.display_name.as_deref().unwrap_or(app_id);
    key.set_value("DisplayName", &display_name)?;
    key.set_value("CustomActivator", &braced_clsid)?;

    if let Some(icon_path) = config.icon_path.as_deref() {
        if icon_path.exists() {
            let icon_path_str = icon_path.to_string_lossy().to_string();
            key.set_value("IconUri", &icon_path_str)?;
            tracing::debug!("AUMID icon set to: {}", icon_path_str);
        } else {
            tracing::warn!("Icon file not found at: {:?}", icon_path);
        }
    }

    tracing::info!("{} AUMID registry entry: {}", action, path);

    let server_path = local_server_key_path(&braced_clsid);
    let (server, _) = hkcu.create_subkey(&server_path)?;
    server.set_value("", &local_server_command(exe, &braced_clsid))?;

    tracing::info!("Registered toast activator local server: {}", server_path);

    Ok(())
}
