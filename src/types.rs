use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A selectable entry in the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub is_selected: bool,
}

impl Item {
    /// Creates an unselected item with a fresh random id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_selected: false,
        }
    }
}

/// `(id, name)` pairs the list starts with.
pub const DEFAULT_ITEMS: [(&str, &str); 9] = [
    ("1", "バナナ"),
    ("2", "トマト"),
    ("3", "納豆"),
    ("4", "キムチ"),
    ("5", "梅干し"),
    ("6", "ヨーグルト"),
    ("7", "牛乳"),
    ("8", "Y1000"),
    ("9", "ミューズリー"),
];

pub fn default_items() -> Vec<Item> {
    DEFAULT_ITEMS
        .iter()
        .map(|(id, name)| Item {
            id: id.to_string(),
            name: name.to_string(),
            is_selected: false,
        })
        .collect()
}

/// Body of `POST /api/webhook`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub items: Vec<String>,
    pub password: String,
}

impl WebhookPayload {
    /// Shape checks serde cannot express.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.password.is_empty() {
            return Err("password must not be empty");
        }
        Ok(())
    }

    /// The body relayed to the external webhook.
    pub fn forwarded(&self) -> ForwardPayload<'_> {
        ForwardPayload { items: &self.items }
    }
}

/// Outbound webhook body. Carries no password field.
#[derive(Debug, Serialize)]
pub struct ForwardPayload<'a> {
    pub items: &'a [String],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
