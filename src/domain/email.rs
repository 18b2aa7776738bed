use serde::{Deserialize, Serialize};

/// One selectable inbox item. Values are copied into the form verbatim, empty strings included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `POST /process-email`. Only built through [`OutboundRequest::from_fields`],
/// so every field is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundRequest {
    sender: String,
    subject: String,
    content: String,
}

impl OutboundRequest {
    pub fn from_fields(sender: &str, subject: &str, content: &str) -> Option<Self> {
        let sender = sender.trim();
        let subject = subject.trim();
        let content = content.trim();
        if sender.is_empty() || subject.is_empty() || content.is_empty() {
            return None;
        }
        Some(Self {
            sender: sender.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}
