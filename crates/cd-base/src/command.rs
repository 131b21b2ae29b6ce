//! Slash-command table and parser.
//!
//! Parsing only classifies the input; the session executes the result.

use std::collections::HashSet;

use serde::Deserialize;

use crate::channel::ChannelId;
use crate::error::CommandTableError;

/// One row of the command table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    /// Lists the commands instead of switching channel
    #[serde(default)]
    pub help: bool,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), help: false }
    }

    pub fn help(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), help: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandAction {
    SwitchChannel(ChannelId),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    SwitchChannel(ChannelId),
    /// `/help`: list every command with its description
    Help,
    /// Free text; answered with the demonstration reply
    Demo,
    /// Unrecognized `/command`, with every valid name in table order
    Unknown { name: String, valid: Vec<String> },
}

/// Static, ordered command table.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<(CommandSpec, CommandAction)>,
}

impl CommandTable {
    /// Validate names: unique, and usable as channel ids.
    pub fn new(specs: Vec<CommandSpec>) -> Result<Self, CommandTableError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(specs.len());
        for spec in specs {
            let name = spec.name.to_lowercase();
            if !seen.insert(name.clone()) {
                return Err(CommandTableError::Duplicate(name));
            }
            let action = if spec.help {
                CommandAction::Help
            } else {
                let id = ChannelId::new(name.clone())
                    .map_err(|source| CommandTableError::InvalidName { name: name.clone(), source })?;
                CommandAction::SwitchChannel(id)
            };
            entries.push((spec, action));
        }
        Ok(Self { entries })
    }

    pub fn specs(&self) -> impl Iterator<Item = &CommandSpec> {
        self.entries.iter().map(|(spec, _)| spec)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs().map(|spec| spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some command switches to `channel`.
    pub fn switches_to(&self, channel: &ChannelId) -> bool {
        self.entries.iter().any(|(_, action)| matches!(action, CommandAction::SwitchChannel(id) if id == channel))
    }

    /// Commands whose name starts with `prefix`, case-insensitively, in table order.
    pub fn matching_prefix(&self, prefix: &str) -> Vec<&CommandSpec> {
        let prefix = prefix.to_lowercase();
        self.specs().filter(|spec| spec.name.to_lowercase().starts_with(&prefix)).collect()
    }

    /// Classify raw input. Blank input yields `None`.
    pub fn parse(&self, raw: &str) -> Option<ParsedCommand> {
        let input = raw.trim();
        if input.is_empty() {
            return None;
        }
        let Some(rest) = input.strip_prefix('/') else {
            return Some(ParsedCommand::Demo);
        };
        let name = rest.trim().to_lowercase();
        let found = self.entries.iter().find(|(spec, _)| spec.name.to_lowercase() == name);
        Some(match found {
            Some((_, CommandAction::SwitchChannel(id))) => ParsedCommand::SwitchChannel(id.clone()),
            Some((_, CommandAction::Help)) => ParsedCommand::Help,
            None => ParsedCommand::Unknown { name, valid: self.names().map(str::to_string).collect() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHANNELS;

    fn table() -> CommandTable {
        CommandTable::new(CHANNELS.commands.clone()).unwrap()
    }

    #[test]
    fn slash_command_switches_channel() {
        assert_eq!(table().parse("/features"), Some(ParsedCommand::SwitchChannel(ChannelId::new("features").unwrap())));
    }

    #[test]
    fn command_is_case_folded_and_trimmed() {
        assert_eq!(
            table().parse("  /How-To-Play  "),
            Some(ParsedCommand::SwitchChannel(ChannelId::new("how-to-play").unwrap()))
        );
    }

    #[test]
    fn unknown_command_lists_valid_names_in_order() {
        let Some(ParsedCommand::Unknown { name, valid }) = table().parse("/doesnotexist") else {
            panic!("expected unknown");
        };
        assert_eq!(name, "doesnotexist");
        assert_eq!(valid, vec!["about", "how-to-play", "features", "welcome", "live-discord", "help"]);
    }

    #[test]
    fn free_text_is_demo() {
        assert_eq!(table().parse("hello there"), Some(ParsedCommand::Demo));
        assert_eq!(table().parse("about"), Some(ParsedCommand::Demo), "no slash means no command");
    }

    #[test]
    fn help_command() {
        assert_eq!(table().parse("/help"), Some(ParsedCommand::Help));
    }

    #[test]
    fn blank_input_is_ignored() {
        assert_eq!(table().parse(""), None);
        assert_eq!(table().parse("   "), None);
    }

    #[test]
    fn bare_slash_is_unknown() {
        assert!(matches!(table().parse("/"), Some(ParsedCommand::Unknown { .. })));
    }

    #[test]
    fn prefix_matching_is_case_insensitive_and_ordered() {
        let t = CommandTable::new(vec![
            CommandSpec::new("features", ""),
            CommandSpec::new("about", ""),
            CommandSpec::new("fun", ""),
            CommandSpec::new("welcome", ""),
        ])
        .unwrap();
        let names: Vec<&str> = t.matching_prefix("F").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["features", "fun"]);
        assert!(t.matching_prefix("eat").is_empty(), "prefix, not substring");
        assert_eq!(t.matching_prefix("").len(), 4);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = CommandTable::new(vec![CommandSpec::new("about", ""), CommandSpec::new("About", "")]).unwrap_err();
        assert_eq!(err, CommandTableError::Duplicate("about".into()));
    }

    #[test]
    fn channel_commands_need_hash_safe_names() {
        let err = CommandTable::new(vec![CommandSpec::new("go now", "")]).unwrap_err();
        assert!(matches!(err, CommandTableError::InvalidName { .. }));
        assert!(CommandTable::new(vec![CommandSpec::help("go now", "")]).is_ok());
    }
}
