//! Template Store: where each channel's authored messages come from.
//!
//! Blocks are named `{channel}-content`. A missing block means the channel is empty, which is a
//! valid state; only an unreadable or malformed block is an error.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::channel::{ChannelId, MessageTemplate};
use crate::config::ChannelsConfig;
use crate::error::{ConfigError, TemplateError};

pub trait TemplateSource {
    /// Ordered messages authored for `channel`, or `None` when no block exists.
    fn load(&self, channel: &ChannelId) -> Result<Option<Vec<MessageTemplate>>, TemplateError>;
}

/// In-memory registry of content blocks, populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    blocks: HashMap<String, Vec<MessageTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ChannelsConfig) -> Self {
        Self { blocks: config.content.clone() }
    }

    /// Parse a YAML mapping of `{channel}-content` → message list.
    pub fn from_yaml(name: &str, content: &str) -> Result<Self, TemplateError> {
        let blocks = serde_yaml::from_str(content)
            .map_err(|source| TemplateError::Parse { name: name.to_string(), source })?;
        Ok(Self { blocks })
    }

    pub fn insert(&mut self, channel: &ChannelId, messages: Vec<MessageTemplate>) {
        self.blocks.insert(channel.content_key(), messages);
    }

    pub fn with(mut self, channel: &ChannelId, messages: Vec<MessageTemplate>) -> Self {
        self.insert(channel, messages);
        self
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl TemplateSource for TemplateRegistry {
    fn load(&self, channel: &ChannelId) -> Result<Option<Vec<MessageTemplate>>, TemplateError> {
        Ok(self.blocks.get(&channel.content_key()).cloned())
    }
}

/// Reads `<root>/{channel}-content.yaml` on demand, falling back to a registry when the file is absent.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    fallback: TemplateRegistry,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, fallback: TemplateRegistry) -> Result<Self, ConfigError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ConfigError::MissingContentDir(root));
        }
        Ok(Self { root, fallback })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn block_path(&self, channel: &ChannelId) -> PathBuf {
        self.root.join(format!("{}.yaml", channel.content_key()))
    }
}

impl TemplateSource for DirectorySource {
    fn load(&self, channel: &ChannelId) -> Result<Option<Vec<MessageTemplate>>, TemplateError> {
        let path = self.block_path(channel);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.fallback.load(channel),
            Err(source) => return Err(TemplateError::Io { path, source }),
        };
        let messages = serde_yaml::from_str(&content)
            .map_err(|source| TemplateError::Parse { name: channel.content_key(), source })?;
        tracing::debug!(channel = %channel, path = %path.display(), "loaded content block from disk");
        Ok(Some(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHANNELS;
    use tempfile::TempDir;

    fn id(raw: &str) -> ChannelId {
        ChannelId::new(raw).unwrap()
    }

    #[test]
    fn registry_finds_blocks_by_naming_convention() {
        let registry = TemplateRegistry::new().with(&id("about"), vec![MessageTemplate::new("hello")]);
        let loaded = registry.load(&id("about")).unwrap().unwrap();
        assert_eq!(loaded[0].body, "hello");
    }

    #[test]
    fn registry_miss_is_not_an_error() {
        let registry = TemplateRegistry::from_config(&CHANNELS);
        assert!(registry.load(&id("tavern")).unwrap().is_none());
    }

    #[test]
    fn registry_from_yaml_keeps_order() {
        let yaml = "about-content:\n  - body: one\n  - body: two\n";
        let registry = TemplateRegistry::from_yaml("inline", yaml).unwrap();
        let bodies: Vec<_> = registry.load(&id("about")).unwrap().unwrap().into_iter().map(|m| m.body).collect();
        assert_eq!(bodies, vec!["one", "two"]);
    }

    #[test]
    fn directory_file_takes_precedence() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("welcome-content.yaml"), "- body: from disk\n").unwrap();
        let source = DirectorySource::new(tmp.path(), TemplateRegistry::from_config(&CHANNELS)).unwrap();

        let welcome = source.load(&id("welcome")).unwrap().unwrap();
        assert_eq!(welcome.len(), 1);
        assert_eq!(welcome[0].body, "from disk");

        let about = source.load(&id("about")).unwrap().unwrap();
        assert!(about.len() > 1, "missing file falls back to the embedded block");
    }

    #[test]
    fn directory_malformed_block_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("about-content.yaml"), "- author: [unterminated\n").unwrap();
        let source = DirectorySource::new(tmp.path(), TemplateRegistry::new()).unwrap();
        assert!(matches!(source.load(&id("about")), Err(TemplateError::Parse { .. })));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("nope");
        assert!(matches!(DirectorySource::new(&gone, TemplateRegistry::new()), Err(ConfigError::MissingContentDir(_))));
    }
}
