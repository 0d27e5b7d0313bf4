//! Rows stored in the settings tables.

use serde::{Deserialize, Serialize};

/// Channels a guild subscribed to each news category.
///
/// Stored as the JSON body of `guild.news` and cached verbatim; `None`
/// means the category is not subscribed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsChannels {
    pub release: Option<u64>,
    pub snapshot: Option<u64>,
    pub article: Option<u64>,
    pub status: Option<u64>,
}

impl NewsChannels {
    /// True when no category has a channel.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.release.is_none()
            && self.snapshot.is_none()
            && self.article.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_news_channels_json_shape() {
        let channels = NewsChannels {
            release: Some(111),
            snapshot: None,
            article: Some(222),
            status: None,
        };
        let json = serde_json::to_value(&channels).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "release": 111,
                "snapshot": null,
                "article": 222,
                "status": null,
            })
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(NewsChannels::default().is_empty());
        assert!(!NewsChannels { release: Some(1), ..Default::default() }.is_empty());
    }
}
