use std::path::Path;

use thiserror::Error;

use crate::domain::EmailEntry;

const BUNDLED_INBOX: &str = include_str!("../data/inbox.json");

#[derive(Debug, Error)]
pub enum InboxError {
    #[error("failed to read inbox file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("inbox is not a JSON list of emails: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The selectable entries shown to the user.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    entries: Vec<EmailEntry>,
}

impl Inbox {
    pub fn bundled() -> Result<Self, InboxError> {
        Self::from_json(BUNDLED_INBOX)
    }

    pub async fn load(path: &Path) -> Result<Self, InboxError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InboxError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let inbox = Self::from_json(&raw)?;
        tracing::info!(target: "inbox", path = %path.display(), entries = inbox.len(), "inbox loaded");
        Ok(inbox)
    }

    pub fn from_json(raw: &str) -> Result<Self, InboxError> {
        let entries: Vec<EmailEntry> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    /// 1-based, as shown in the listing.
    pub fn get(&self, index: usize) -> Option<&EmailEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[EmailEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
