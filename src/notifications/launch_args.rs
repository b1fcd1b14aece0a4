//! Launch argument codec.
//!
//! The identifier and user-info of a toast travel inside the `launch`
//! attribute of the toast root element. That attribute is the only state a
//! cold-started process gets back from the OS, so everything needed to
//! dispatch an event must be recoverable from it.
//!
//! Format: `notificationId=<pct>;userInfo=<pct>`, where `<pct>` is the
//! percent-encoded UTF-8 value. Percent-encoding leaves only `[A-Za-z0-9-_.~%]`
//! in each value, so the string can be embedded in XML without escaping.

use std::borrow::Cow;

use thiserror::Error;

const NOTIFICATION_ID_KEY: &str = "notificationId";
const USER_INFO_KEY: &str = "userInfo";
const SEGMENT_SEPARATOR: char = ';';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchArgsError {
    #[error("missing notificationId")]
    MissingNotificationId,

    #[error("malformed segment '{0}'")]
    MalformedSegment(String),

    #[error("invalid encoding for '{0}'")]
    InvalidEncoding(String),
}

/// Decoded launch arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs {
    pub notification_id: String,
    /// Opaque serialized payload; empty when the toast carried none.
    pub user_info: String,
}

pub fn encode(notification_id: &str, user_info: &str) -> String {
    format!(
        "{}={}{}{}={}",
        NOTIFICATION_ID_KEY,
        urlencoding::encode(notification_id),
        SEGMENT_SEPARATOR,
        USER_INFO_KEY,
        urlencoding::encode(user_info)
    )
}

pub fn decode(launch_args: &str) -> Result<LaunchArgs, LaunchArgsError> {
    let mut notification_id = None;
    let mut user_info = None;

    for segment in launch_args.split(SEGMENT_SEPARATOR) {
        if segment.is_empty() {
            continue;
        }

        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| LaunchArgsError::MalformedSegment(segment.to_string()))?;

        match key {
            NOTIFICATION_ID_KEY => notification_id = Some(decode_value(key, value)?),
            USER_INFO_KEY => user_info = Some(decode_value(key, value)?),
            _ => tracing::debug!("Ignoring unknown launch argument '{}'", key),
        }
    }

    Ok(LaunchArgs {
        notification_id: notification_id.ok_or(LaunchArgsError::MissingNotificationId)?,
        user_info: user_info.unwrap_or_default(),
    })
}

fn decode_value(key: &str, value: &str) -> Result<String, LaunchArgsError> {
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .map_err(|_| LaunchArgsError::InvalidEncoding(key.to_string()))
}

/// Identifier carried by `launch_args`, or `None` if it cannot be decoded.
pub fn parse_notification_id(launch_args: &str) -> Option<String> {
    match decode(launch_args) {
        Ok(args) => Some(args.notification_id),
        Err(e) => {
            tracing::error!("Could not parse notification ID from '{}': {}", launch_args, e);
            None
        }
    }
}

/// User-info carried by `launch_args`; empty if absent or undecodable.
pub fn parse_user_info(launch_args: &str) -> String {
    match decode(launch_args) {
        Ok(args) => args.user_info,
        Err(e) => {
            tracing::error!("Could not parse user info from '{}': {}", launch_args, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(id: &str, user_info: &str) {
        let decoded = decode(&encode(id, user_info)).unwrap();
        assert_eq!(decoded.notification_id, id);
        assert_eq!(decoded.user_info, user_info);
    }

    #[test]
    fn test_round_trip() {
        round_trip("n1", r#"{"k":1}"#);
        round_trip("n1", "");
        round_trip("", "");
        round_trip("id;with=separators&amp", r#"{"text":"a;b=c","quote":"\"<>&'"}"#);
        round_trip("unicode-é-✓", r#"{"emoji":"🔔"}"#);
    }

    #[test]
    fn test_encoded_value_is_attribute_safe() {
        let encoded = encode("n\"1", r#"{"a":"<b>&'c'"}"#);
        assert!(!encoded.contains(['"', '\'', '<', '>', '&']));
    }

    #[test]
    fn test_missing_user_info_decodes_as_empty() {
        let decoded = decode("notificationId=n2").unwrap();
        assert_eq!(decoded.notification_id, "n2");
        assert_eq!(decoded.user_info, "");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let decoded = decode("version=2;notificationId=n3;userInfo=%7B%7D").unwrap();
        assert_eq!(decoded.notification_id, "n3");
        assert_eq!(decoded.user_info, "{}");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(""), Err(LaunchArgsError::MissingNotificationId));
        assert_eq!(decode("userInfo=%7B%7D"), Err(LaunchArgsError::MissingNotificationId));
        assert_eq!(
            decode("notificationId"),
            Err(LaunchArgsError::MalformedSegment("notificationId".to_string()))
        );
        assert_eq!(
            decode("notificationId=%FF"),
            Err(LaunchArgsError::InvalidEncoding("notificationId".to_string()))
        );
    }

    #[test]
    fn test_parse_helpers() {
        let launch = encode("n4", "[1,2]");
        assert_eq!(parse_notification_id(&launch).as_deref(), Some("n4"));
        assert_eq!(parse_user_info(&launch), "[1,2]");

        assert_eq!(parse_notification_id("garbage"), None);
        assert_eq!(parse_user_info("garbage"), "");
    }
}
