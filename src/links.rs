//! Message link parsing
//!
//! Discussion ranges are addressed by `t.me` links, either
//! `https://t.me/channel/message_id` or, inside a forum topic,
//! `https://t.me/channel/thread_id/message_id`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Regex for `t.me` message links, thread id optional
static MESSAGE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://t\.me/([^/\s]+)(?:/(\d+))?/(\d+)$").expect("valid regex")
});

/// Parsed form of a `t.me` message link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLink {
    pub channel: String,
    pub thread_id: Option<i64>,
    pub message_id: i64,
}

/// Parse a `t.me` message link into its channel, thread and message parts
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] when the URL does not have one of the
/// two accepted shapes or an id does not fit in an `i64`.
pub fn parse_message_link(url: &str) -> Result<MessageLink> {
    let captures = MESSAGE_LINK_REGEX.captures(url.trim()).ok_or_else(|| {
        Error::InvalidLink(format!(
            "invalid URL format: {url}, expected https://t.me/channel_name/message_id \
             or https://t.me/channel_name/thread_id/message_id"
        ))
    })?;

    let thread_id = match captures.get(2) {
        Some(digits) => Some(parse_id(digits.as_str(), url)?),
        None => None,
    };

    Ok(MessageLink {
        channel: captures[1].to_string(),
        thread_id,
        message_id: parse_id(&captures[3], url)?,
    })
}

fn parse_id(digits: &str, url: &str) -> Result<i64> {
    digits
        .parse()
        .map_err(|_| Error::InvalidLink(format!("message id out of range in {url}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_and_message_id() {
        let link = parse_message_link("https://t.me/durov/123456").unwrap();
        assert_eq!(link.channel, "durov");
        assert_eq!(link.thread_id, None);
        assert_eq!(link.message_id, 123_456);
    }

    #[test]
    fn test_channel_thread_and_message_id() {
        let link = parse_message_link("https://t.me/AnimeCellTbilisi/357929/826788").unwrap();
        assert_eq!(link.channel, "AnimeCellTbilisi");
        assert_eq!(link.thread_id, Some(357_929));
        assert_eq!(link.message_id, 826_788);
    }

    #[test]
    fn test_http_scheme() {
        let link = parse_message_link("http://t.me/channel_name/123456").unwrap();
        assert_eq!(link.channel, "channel_name");
        assert_eq!(link.message_id, 123_456);
    }

    #[test]
    fn test_channel_with_numbers() {
        let link = parse_message_link("https://t.me/channel123/123456").unwrap();
        assert_eq!(link.channel, "channel123");
    }

    #[test]
    fn test_missing_message_id_is_rejected() {
        let err = parse_message_link("https://t.me/channel_name/").unwrap_err();
        assert!(err.to_string().contains("invalid URL format"));
    }

    #[test]
    fn test_wrong_host_is_rejected() {
        assert!(parse_message_link("https://telegram.org/channel_name/123456").is_err());
    }

    #[test]
    fn test_non_numeric_ids_are_rejected() {
        assert!(parse_message_link("https://t.me/channel_name/abc/def").is_err());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        assert!(parse_message_link("https://t.me/channel_name/123x").is_err());
    }
}
