//! Localized page content served by the backend CMS.

use serde::{Deserialize, Serialize};

/// The assistant page document from `GET /{lang}/cms/assistant`.
///
/// `usage_text` and `disclaimer_text` arrive as rendered HTML. Fields this
/// client does not know about are kept in `extra` and handed to the templates
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub prompt_label: String,
    #[serde(default)]
    pub prompt_placeholder: String,
    #[serde(default)]
    pub prompt_button: String,
    #[serde(default)]
    pub response_label: String,
    #[serde(default)]
    pub usage_open: String,
    #[serde(default)]
    pub usage_close: String,
    #[serde(default)]
    pub usage_text: String,
    #[serde(default)]
    pub disclaimer_open: String,
    #[serde(default)]
    pub disclaimer_close: String,
    #[serde(default)]
    pub disclaimer_text: String,
    #[serde(default)]
    pub copy_button: String,
    /// `[code, display name]` pairs, e.g. `["sv", "Swedish"]`.
    #[serde(default)]
    pub languages: Vec<(String, String)>,
    /// Language the backend rendered this document in.
    #[serde(default)]
    pub lang: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
