//! Minecraft wiki query records, MediaWiki `query.pages` shape.

use serde::{Deserialize, Serialize};

/// Response to an extracts query against the fandom wiki.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiResponse {
    pub query: WikiQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiQuery {
    #[serde(default)]
    pub pages: Vec<WikiPage>,
}

/// One resolved page. A title that matched nothing comes back without an
/// extract and with `missing` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiPage {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    #[serde(default)]
    pub missing: bool,
}

impl WikiResponse {
    /// The matched article, last page wins (usually the only one).
    pub fn article(&self) -> Option<&WikiPage> {
        self.query
            .pages
            .iter()
            .rev()
            .find(|page| !page.missing && page.extract.is_some())
    }
}

impl WikiPage {
    /// Canonical link to the article.
    pub fn link(&self) -> String {
        format!("https://minecraft.fandom.com/{}", self.title.replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolved_page_decodes() {
        let body = serde_json::json!({
            "query": {
                "pages": [{
                    "pageid": 3840,
                    "title": "Creeper",
                    "extract": "A creeper is a common hostile mob.\n"
                }]
            }
        });
        let response: WikiResponse = serde_json::from_value(body).unwrap();
        let page = response.article().unwrap();
        assert_eq!(page.title, "Creeper");
        assert_eq!(page.link(), "https://minecraft.fandom.com/Creeper");
    }

    #[test]
    fn test_missing_page_is_no_article() {
        let body = serde_json::json!({
            "query": {
                "pages": [{
                    "title": "No Such Thing",
                    "missing": true
                }]
            }
        });
        let response: WikiResponse = serde_json::from_value(body).unwrap();
        assert!(response.article().is_none());
    }

    #[test]
    fn test_multiword_title_links_with_underscores() {
        let page = WikiPage {
            title: "Ender Dragon".to_string(),
            extract: Some("The ender dragon is a boss mob.".to_string()),
            missing: false,
        };
        assert_eq!(page.link(), "https://minecraft.fandom.com/Ender_Dragon");
    }
}
