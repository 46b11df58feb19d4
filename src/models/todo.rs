use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single TODO item. Every item belongs to exactly one owner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub owner_id: String,
    pub item_id: String,
    pub name: String,
    pub due_date: NaiveDate,
    pub done: bool,
    /// Always nine fractional digits, so stored strings sort chronologically.
    #[serde(with = "fixed_width_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// Build a fresh, not-yet-done item for `owner_id` with a new UUID item id.
    pub fn new(owner_id: &str, name: String, due_date: NaiveDate) -> Self {
        TodoItem {
            owner_id: owner_id.to_string(),
            item_id: uuid::Uuid::new_v4().to_string(),
            name,
            due_date,
            done: false,
            created_at: Utc::now(),
            attachment_url: None,
        }
    }

    /// Apply the mutable fields of an update. Owner and item id stay untouched.
    pub fn apply(&mut self, update: &UpdateTodoRequest) {
        self.name = update.name.clone();
        self.due_date = update.due_date;
        self.done = update.done;
    }
}

mod fixed_width_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Nanos, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// Body of `POST /todos`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: NaiveDate,
}

/// Body of `PATCH /todos/{itemId}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub name: String,
    pub due_date: NaiveDate,
    pub done: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TodoResponse {
    pub item: TodoItem,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
}
