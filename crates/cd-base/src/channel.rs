//! Channel identifiers and message records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::{CONTENT_BLOCK_SUFFIX, DEFAULT_AUTHOR};
use crate::error::ChannelIdError;

/// URL-hash-safe channel identifier (`[a-z0-9_-]+`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ChannelIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ChannelIdError::Empty);
        }
        if !raw.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_') {
            return Err(ChannelIdError::InvalidChar(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Location indicator form, e.g. `#features`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }

    /// Name of the authored block for this channel, e.g. `features-content`.
    pub fn content_key(&self) -> String {
        format!("{}{}", self.0, CONTENT_BLOCK_SUFFIX)
    }
}

impl TryFrom<String> for ChannelId {
    type Error = ChannelIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelId> for String {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Normal,
    System,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

/// An authored message, not yet stamped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageTemplate {
    #[serde(default = "default_author")]
    pub author: String,
    /// Markup fragment
    pub body: String,
    #[serde(default)]
    pub kind: MessageKind,
}

impl MessageTemplate {
    pub fn new(body: impl Into<String>) -> Self {
        Self { author: default_author(), body: body.into(), kind: MessageKind::Normal }
    }

    /// A message spoken by the bot itself rather than authored content.
    pub fn system(body: impl Into<String>) -> Self {
        Self { author: default_author(), body: body.into(), kind: MessageKind::System }
    }

    /// Stamp the template with the moment it is appended to the transcript.
    pub fn render(&self, timestamp: String) -> RenderedMessage {
        RenderedMessage { author: self.author.clone(), timestamp, body: self.body.clone(), kind: self.kind }
    }
}

/// A message as it appears in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub author: String,
    pub timestamp: String,
    pub body: String,
    pub kind: MessageKind,
}
