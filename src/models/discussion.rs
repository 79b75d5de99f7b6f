use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionPost {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_image: String,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub reply_to_post_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscussionPost {
    pub content: String,
    pub user_name: String,
    pub user_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_post_id: Option<String>,
}
