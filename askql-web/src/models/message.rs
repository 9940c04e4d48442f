use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageRole {
    System,
    User,
    Ai,
}

/// One entry of the per-session conversation log.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Ai, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn is_ai(&self) -> bool {
        self.role == MessageRole::Ai
    }

    /// Bubble styling per role, matching the product's palette.
    pub fn css_class(&self) -> &'static str {
        match self.role {
            MessageRole::User => "bg-blue-100 text-blue-800 ml-auto",
            MessageRole::System | MessageRole::Ai => "bg-gray-100 text-gray-800",
        }
    }
}
