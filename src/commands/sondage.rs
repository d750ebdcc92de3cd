//! Poll Endpoints
//!
//! URL building for the poll service and page-number translation.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Endpoint paths, without trailing slashes
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    polls_api: String,
    polls_fragments: String,
}

impl Endpoints {
    pub fn new(polls_api: &str, polls_fragments: &str) -> Self {
        Self {
            polls_api: polls_api.trim_end_matches('/').to_string(),
            polls_fragments: polls_fragments.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.polls_api_path, &config.polls_fragment_path)
    }

    /// Creation endpoint
    pub fn polls_api_url(&self) -> &str {
        &self.polls_api
    }

    /// Fragment holding one page of polls (zero-indexed)
    pub fn fragment_page_url(&self, page: u32) -> String {
        format!("{}?page={}", self.polls_fragments, page)
    }

    /// Fragment holding a single poll
    pub fn fragment_item_url(&self, id: u64) -> String {
        format!("{}/{}", self.polls_fragments, id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// Server page index for the page number shown in the UI.
///
/// The UI counts from 1, the server from 0.
pub fn page_index_from_label(label: &str) -> ClientResult<u32> {
    let shown: i64 = label
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidPage(label.to_string()))?;
    if shown < 1 {
        return Err(ClientError::InvalidPage(label.to_string()));
    }
    u32::try_from(shown - 1).map_err(|_| ClientError::InvalidPage(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label_is_shifted_down() {
        assert_eq!(page_index_from_label("3").unwrap(), 2);
        assert_eq!(page_index_from_label("1").unwrap(), 0);
        assert_eq!(page_index_from_label(" 12\n").unwrap(), 11);
    }

    #[test]
    fn test_page_label_rejects_garbage() {
        assert_eq!(page_index_from_label("0"), Err(ClientError::InvalidPage("0".into())));
        assert_eq!(page_index_from_label("-4"), Err(ClientError::InvalidPage("-4".into())));
        assert_eq!(page_index_from_label(""), Err(ClientError::InvalidPage("".into())));
        assert_eq!(page_index_from_label("deux"), Err(ClientError::InvalidPage("deux".into())));
        assert!(page_index_from_label("99999999999").is_err());
    }

    #[test]
    fn test_default_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.polls_api_url(), "/api/sondages");
        assert_eq!(endpoints.fragment_page_url(2), "/fragments/sondages?page=2");
        assert_eq!(endpoints.fragment_item_url(7), "/fragments/sondages/7");
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let endpoints = Endpoints::new("/app/api/sondages/", "/app/fragments/sondages/");
        assert_eq!(endpoints.polls_api_url(), "/app/api/sondages");
        assert_eq!(endpoints.fragment_item_url(1), "/app/fragments/sondages/1");
    }
}
