//! Client Configuration
//!
//! Element ids and endpoint paths used by the poll list controller.
//! The page may override any of them with a JSON block:
//!
//! ```html
//! <script type="application/json" id="sondages-config">
//!   { "listContainerId": "polls", "logLevel": "debug" }
//! </script>
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::error::{ClientError, ClientResult};

/// Id of the optional configuration block
pub const CONFIG_ELEMENT_ID: &str = "sondages-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub refresh_button_id: String,
    pub create_form_id: String,
    pub list_container_id: String,
    pub page_indicator_selector: String,
    pub polls_api_path: String,
    pub polls_fragment_path: String,
    /// Declared for the voting pages; nothing here calls it
    pub votes_api_path: String,
    pub failure_indicator_id: String,
    /// Auto-hide delay for the failure banner, 0 keeps it until dismissed
    pub failure_dismiss_ms: u32,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_button_id: "btn-refresh-pollings".to_string(),
            create_form_id: "form-creation-sondage".to_string(),
            list_container_id: "sondages".to_string(),
            page_indicator_selector: ".page-courante".to_string(),
            polls_api_path: "/api/sondages".to_string(),
            polls_fragment_path: "/fragments/sondages".to_string(),
            votes_api_path: "/api/votes".to_string(),
            failure_indicator_id: "sondages-erreur".to_string(),
            failure_dismiss_ms: 8000,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(text: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read the page's configuration block.
    ///
    /// A missing block yields the defaults; a malformed one yields the
    /// defaults plus the parse error so the caller can report it once
    /// logging is up.
    pub fn load(document: &Document) -> (Self, Option<ClientError>) {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        match text {
            Some(text) if !text.trim().is_empty() => match Self::from_json(&text) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            _ => (Self::default(), None),
        }
    }

    /// Log level, `info` when unrecognised
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_index_page() {
        let config = ClientConfig::default();
        assert_eq!(config.refresh_button_id, "btn-refresh-pollings");
        assert_eq!(config.create_form_id, "form-creation-sondage");
        assert_eq!(config.list_container_id, "sondages");
        assert_eq!(config.page_indicator_selector, ".page-courante");
        assert_eq!(config.polls_api_path, "/api/sondages");
        assert_eq!(config.polls_fragment_path, "/fragments/sondages");
        assert_eq!(config.votes_api_path, "/api/votes");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = ClientConfig::from_json(r#"{"listContainerId":"polls","logLevel":"DEBUG"}"#).unwrap();
        assert_eq!(config.list_container_id, "polls");
        assert_eq!(config.create_form_id, "form-creation-sondage");
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = ClientConfig { log_level: "chatty".to_string(), ..Default::default() };
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(ClientConfig::from_json("{listContainerId:"), Err(ClientError::Json(_))));
    }
}
