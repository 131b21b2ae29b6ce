//! Content Cache: channel id → fully rendered transcript.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::channel::{ChannelId, RenderedMessage};

/// Immutable rendered transcript of one channel.
///
/// There are no mutating accessors; a changed transcript is stored as a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    messages: Arc<[RenderedMessage]>,
    digest: String,
}

impl RenderedContent {
    pub fn new(messages: Vec<RenderedMessage>) -> Self {
        let digest = hash_messages(&messages);
        Self { messages: messages.into(), digest }
    }

    pub fn messages(&self) -> &[RenderedMessage] {
        &self.messages
    }

    /// SHA-256 over every field of every message, in order.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Hash a transcript for byte-identity comparison
pub fn hash_messages(messages: &[RenderedMessage]) -> String {
    let mut hasher = Sha256::new();
    for msg in messages {
        for field in [msg.author.as_str(), msg.timestamp.as_str(), msg.body.as_str()] {
            hasher.update(field.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([msg.kind as u8, 0x1e]);
    }
    format!("{:064x}", hasher.finalize())
}

#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<ChannelId, RenderedContent>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: &ChannelId) -> Option<&RenderedContent> {
        self.entries.get(channel)
    }

    /// Store `content`, replacing any previous entry wholesale. Returns the replaced entry.
    pub fn put(&mut self, channel: ChannelId, content: RenderedContent) -> Option<RenderedContent> {
        tracing::debug!(channel = %channel, messages = content.len(), "caching rendered channel");
        self.entries.insert(channel, content)
    }

    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.entries.contains_key(channel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
