//! Channel Session: the single owner of "which channel is active" and of the transcript.
//!
//! Every mutation of the transcript goes through here. Scheduled operations are tagged with the
//! generation they were created under; a switch bumps the generation, cancels what is pending, and
//! anything that still fires from an older generation is dropped before it can touch the view.

use tracing::{debug, error, info, trace};

use crate::cache::{ContentCache, RenderedContent};
use crate::channel::{ChannelId, MessageTemplate, RenderedMessage};
use crate::clock::Clock;
use crate::command::{CommandTable, ParsedCommand};
use crate::config::{CHANNELS, CONFIG, Responses, Timings};
use crate::error::{ConfigError, SessionError};
use crate::location::{Location, strip_hash};
use crate::scheduler::{AnimationScheduler, Generation, OperationKind, PostRevealAction, ScheduledOperation};
use crate::templates::TemplateSource;
use crate::typing::TypingIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOrigin {
    /// Sidebar click or slash command; written into the location.
    User,
    /// Location change the app did not make (back/forward); never written back.
    Navigation,
}

/// Signals for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ChannelChanged(ChannelId),
    LocationChanged(String),
    /// Reveal the sidebar and the command input. Emitted at most once.
    ShowInterface,
}

/// Everything a session needs besides its content source and clock.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub home: ChannelId,
    /// Sidebar channels, in display order
    pub channels: Vec<ChannelId>,
    pub commands: CommandTable,
    pub responses: Responses,
    pub timings: Timings,
}

impl SessionConfig {
    /// Registry, commands and replies from the embedded YAML.
    pub fn embedded(timings: Timings) -> Result<Self, ConfigError> {
        Ok(Self {
            home: CHANNELS.home.clone(),
            channels: CHANNELS.channel_ids(),
            commands: CommandTable::new(CHANNELS.commands.clone())?,
            responses: CONFIG.responses.clone(),
            timings,
        })
    }
}

enum Resolved {
    Cached(RenderedContent),
    Sequence(Vec<MessageTemplate>),
}

pub struct ChannelSession {
    home: ChannelId,
    channels: Vec<ChannelId>,
    commands: CommandTable,
    responses: Responses,
    current: ChannelId,
    generation: Generation,
    /// Cleared by the first switch after startup
    first_load: bool,
    /// The entry location named something; startup renders without animation
    entry_had_channel: bool,
    interface_shown: bool,
    scheduler: AnimationScheduler,
    typing: TypingIndicator,
    cache: ContentCache,
    transcript: Vec<RenderedMessage>,
    location: Location,
    source: Box<dyn TemplateSource>,
    clock: Box<dyn Clock>,
    events: Vec<SessionEvent>,
}

impl ChannelSession {
    pub fn new(config: SessionConfig, source: Box<dyn TemplateSource>, clock: Box<dyn Clock>) -> Self {
        Self {
            current: config.home.clone(),
            home: config.home,
            channels: config.channels,
            commands: config.commands,
            responses: config.responses,
            generation: Generation::default(),
            first_load: true,
            entry_had_channel: false,
            interface_shown: false,
            scheduler: AnimationScheduler::new(config.timings),
            typing: TypingIndicator::new(),
            cache: ContentCache::new(),
            transcript: Vec::new(),
            location: Location::new(""),
            source,
            clock,
            events: Vec::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────

    /// Initial load from the entry location.
    ///
    /// An empty or unknown fragment lands on the home channel. Any non-empty fragment counts as a
    /// deep link: content appears at once and the interface is revealed immediately.
    pub fn start(&mut self, entry_fragment: &str) {
        self.entry_had_channel = !strip_hash(entry_fragment.trim()).is_empty();
        self.location = Location::new(entry_fragment);
        let channel = self.resolve_fragment(entry_fragment);
        info!(channel = %channel, deep_link = self.entry_had_channel, "session started");

        self.current = channel.clone();
        self.events.push(SessionEvent::ChannelChanged(channel.clone()));
        if self.entry_had_channel {
            self.show_interface();
        }

        match self.load_sequence(&channel) {
            Ok(sequence) if self.renders_immediately() => self.render_immediately(&channel, &sequence),
            Ok(sequence) => {
                let now = self.clock.now_ms();
                self.play(&channel, &sequence, now);
            }
            Err(e) => error!(channel = %channel, error = %e, "failed to load entry channel"),
        }
        self.tick();
    }

    /// Switch channels, logging and swallowing failures. Returns whether the switch happened.
    pub fn switch_to(&mut self, channel: &ChannelId, origin: SwitchOrigin) -> bool {
        match self.try_switch_to(channel, origin) {
            Ok(()) => true,
            Err(e) => {
                error!(channel = %channel, error = %e, "channel switch failed, keeping current view");
                false
            }
        }
    }

    /// Switch by raw id, e.g. from a sidebar row or a script line.
    pub fn try_switch_to_name(&mut self, raw: &str, origin: SwitchOrigin) -> Result<(), SessionError> {
        let channel = ChannelId::new(raw)?;
        self.try_switch_to(&channel, origin)
    }

    /// Switch channels. Content is resolved before any visible state changes, so an `Err`
    /// leaves the session exactly as it was, running animation included.
    pub fn try_switch_to(&mut self, channel: &ChannelId, origin: SwitchOrigin) -> Result<(), SessionError> {
        let resolved = match self.cache.get(channel) {
            Some(content) => Resolved::Cached(content.clone()),
            None => Resolved::Sequence(self.load_sequence(channel)?),
        };

        self.first_load = false;
        self.cancel_pending();
        self.generation = self.generation.next();
        self.current = channel.clone();
        if origin == SwitchOrigin::User && self.location.push(&channel.fragment()) {
            self.events.push(SessionEvent::LocationChanged(channel.fragment()));
        }
        self.events.push(SessionEvent::ChannelChanged(channel.clone()));
        self.transcript.clear();

        match resolved {
            Resolved::Cached(content) => {
                info!(channel = %channel, ?origin, messages = content.len(), "switched channel (cached)");
                self.transcript.extend_from_slice(content.messages());
            }
            Resolved::Sequence(sequence) => {
                info!(channel = %channel, ?origin, messages = sequence.len(), "switched channel (animating)");
                let now = self.clock.now_ms();
                self.play(channel, &sequence, now);
            }
        }
        self.tick();
        Ok(())
    }

    /// Location-change handler. Switches only when the fragment resolves to another channel.
    pub fn navigate(&mut self, fragment: &str) -> bool {
        let channel = self.resolve_fragment(fragment);
        if channel == self.current {
            return false;
        }
        self.switch_to(&channel, SwitchOrigin::Navigation)
    }

    pub fn back(&mut self) -> bool {
        let Some(fragment) = self.location.back().map(str::to_string) else {
            return false;
        };
        self.navigate(&fragment)
    }

    pub fn forward(&mut self) -> bool {
        let Some(fragment) = self.location.forward().map(str::to_string) else {
            return false;
        };
        self.navigate(&fragment)
    }

    /// Parse and execute command-bar input. Blank input does nothing.
    pub fn submit(&mut self, raw: &str) -> Option<ParsedCommand> {
        let parsed = self.commands.parse(raw)?;
        debug!(?parsed, "command submitted");
        match &parsed {
            ParsedCommand::SwitchChannel(channel) => {
                self.switch_to(channel, SwitchOrigin::User);
            }
            ParsedCommand::Help => {
                let body = self.responses.help(self.commands.specs());
                self.reply(body);
            }
            ParsedCommand::Demo => {
                let body = self.responses.demo.clone();
                self.reply(body);
            }
            ParsedCommand::Unknown { name, .. } => {
                let body = self.responses.unknown_command(name, self.commands.names());
                self.reply(body);
            }
        }
        Some(parsed)
    }

    /// Fire every operation due by now, then let the typing indicator time out.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        while let Some(op) = self.scheduler.pop_due(now) {
            self.fire(op);
        }
        if self.typing.expire(now) {
            trace!("typing indicator timed out");
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internal ──────────────────────────────────────────────────

    fn fire(&mut self, op: ScheduledOperation) {
        if op.generation != self.generation || op.owner != self.current {
            debug!(
                owner = %op.owner,
                generation = op.generation.value(),
                current = self.generation.value(),
                "dropping stale operation"
            );
            return;
        }
        match op.kind {
            OperationKind::ShowTyping { duration_ms } => self.typing.show(op.fire_at_ms, duration_ms),
            OperationKind::Reveal { message } => {
                self.typing.hide();
                self.transcript.push(message.render(self.clock.timestamp()));
                if self.scheduler.pending_reveals(self.generation) == 0 {
                    self.cache.put(self.current.clone(), RenderedContent::new(self.transcript.clone()));
                }
            }
            OperationKind::PostReveal(PostRevealAction::ShowInterface) => self.show_interface(),
        }
    }

    fn play(&mut self, channel: &ChannelId, sequence: &[MessageTemplate], start_ms: u64) {
        let last_reveal = self.scheduler.play(sequence, channel, self.generation, start_ms);
        if let Some(last_reveal) = last_reveal
            && *channel == self.home
            && !self.entry_had_channel
            && !self.interface_shown
        {
            let at = last_reveal.saturating_add(self.scheduler.timings().interface_delay_ms);
            let kind = OperationKind::PostReveal(PostRevealAction::ShowInterface);
            self.scheduler.schedule(at, kind, channel, self.generation);
        }
    }

    /// A queued reply to the command bar, revealed with the usual typing delay.
    fn reply(&mut self, body: String) {
        let now = self.clock.now_ms();
        let current = self.current.clone();
        self.scheduler.play(&[MessageTemplate::system(body)], &current, self.generation, now);
        self.tick();
    }

    fn render_immediately(&mut self, channel: &ChannelId, sequence: &[MessageTemplate]) {
        let stamp = self.clock.timestamp();
        self.transcript = sequence.iter().map(|m| m.render(stamp.clone())).collect();
        self.cache.put(channel.clone(), RenderedContent::new(self.transcript.clone()));
    }

    /// Authored messages, or the single "no content yet" message for an empty channel.
    fn load_sequence(&self, channel: &ChannelId) -> Result<Vec<MessageTemplate>, SessionError> {
        match self.source.load(channel)? {
            Some(messages) if !messages.is_empty() => Ok(messages),
            _ => {
                debug!(channel = %channel, "no authored content, using placeholder");
                Ok(vec![MessageTemplate::system(self.responses.empty_channel(channel))])
            }
        }
    }

    fn cancel_pending(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.typing.hide();
        if cancelled.is_empty() {
            return;
        }
        debug!(count = cancelled.len(), generation = self.generation.value(), "cancelled pending operations");
        let interface_pending = cancelled
            .iter()
            .any(|op| op.kind == OperationKind::PostReveal(PostRevealAction::ShowInterface));
        if interface_pending {
            self.show_interface();
        }
    }

    fn show_interface(&mut self) {
        if self.interface_shown {
            return;
        }
        self.interface_shown = true;
        info!("revealing sidebar and command input");
        self.events.push(SessionEvent::ShowInterface);
    }

    fn renders_immediately(&self) -> bool {
        self.first_load && self.entry_had_channel
    }

    fn resolve_fragment(&self, fragment: &str) -> ChannelId {
        ChannelId::new(strip_hash(fragment.trim()))
            .ok()
            .filter(|id| self.is_known(id))
            .unwrap_or_else(|| self.home.clone())
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn is_known(&self, channel: &ChannelId) -> bool {
        self.channels.contains(channel) || self.commands.switches_to(channel)
    }

    pub fn current(&self) -> &ChannelId {
        &self.current
    }

    pub fn home(&self) -> &ChannelId {
        &self.home
    }

    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn transcript(&self) -> &[RenderedMessage] {
        &self.transcript
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_visible()
    }

    pub fn typing_shown_count(&self) -> u64 {
        self.typing.shown_count()
    }

    pub fn interface_shown(&self) -> bool {
        self.interface_shown
    }

    pub fn is_first_load(&self) -> bool {
        self.first_load
    }

    pub fn entry_had_channel(&self) -> bool {
        self.entry_had_channel
    }

    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Earliest moment something will change on its own.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.scheduler.next_deadline(), self.typing.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::hash_messages;
    use crate::channel::MessageKind;
    use crate::error::TemplateError;
    use crate::replay::ReplayDriver;
    use crate::templates::TemplateRegistry;

    fn id(raw: &str) -> ChannelId {
        ChannelId::new(raw).unwrap()
    }

    fn bodies(driver: &ReplayDriver) -> Vec<String> {
        driver.session().transcript().iter().map(|m| m.body.clone()).collect()
    }

    /// Home has two messages, `about` three, `features` one; `tavern` is empty.
    fn driver_with_small_registry(timings: Timings) -> ReplayDriver {
        let registry = TemplateRegistry::new()
            .with(&id("welcome"), vec![MessageTemplate::new("w0"), MessageTemplate::new("w1")])
            .with(&id("about"), vec![MessageTemplate::new("a0"), MessageTemplate::new("a1"), MessageTemplate::new("a2")])
            .with(&id("features"), vec![MessageTemplate::new("f0")]);
        let config = SessionConfig::embedded(timings).unwrap();
        ReplayDriver::new(config, Box::new(registry))
    }

    fn started(entry: &str) -> ReplayDriver {
        let mut driver = driver_with_small_registry(Timings::default());
        driver.session_mut().start(entry);
        driver
    }

    #[test]
    fn organic_start_animates_home() {
        let mut d = started("");
        assert_eq!(d.session().current(), &id("welcome"));
        assert!(d.session().is_typing(), "first typing indicator fires at t=0");
        assert!(bodies(&d).is_empty());

        d.advance(1000);
        assert_eq!(bodies(&d), vec!["w0"]);
        assert!(!d.session().is_typing());

        d.advance(200);
        assert!(d.session().is_typing());
        d.advance(1000);
        assert_eq!(bodies(&d), vec!["w0", "w1"]);
        assert!(d.session().cache().contains(&id("welcome")));
    }

    #[test]
    fn interface_appears_once_after_home_finishes() {
        let mut d = started("");
        d.advance(2200);
        assert!(!d.session().interface_shown());
        d.advance(499);
        assert!(!d.session().interface_shown());
        d.advance(1);
        assert!(d.session().interface_shown());

        let shows = d.session_mut().drain_events().into_iter().filter(|e| *e == SessionEvent::ShowInterface).count();
        assert_eq!(shows, 1);

        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        d.settle();
        d.session_mut().switch_to(&id("welcome"), SwitchOrigin::User);
        d.settle();
        assert!(!d.session_mut().drain_events().contains(&SessionEvent::ShowInterface));
    }

    #[test]
    fn leaving_home_mid_animation_reveals_interface_immediately() {
        let mut d = started("");
        d.advance(500);
        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        assert!(d.session().interface_shown());
    }

    #[test]
    fn deep_link_renders_without_animation() {
        let d = started("#about");
        assert_eq!(d.session().current(), &id("about"));
        assert_eq!(bodies(&d), vec!["a0", "a1", "a2"]);
        assert_eq!(d.session().typing_shown_count(), 0);
        assert!(!d.session().is_animating());
        assert!(d.session().interface_shown());
        assert!(d.session().cache().contains(&id("about")));
        assert!(d.session().is_first_load());
    }

    #[test]
    fn deep_link_to_empty_channel_shows_placeholder_at_once() {
        let d = started("#tavern");
        assert_eq!(bodies(&d), vec!["Welcome to the #tavern channel. This channel has no content yet."]);
        assert_eq!(d.session().transcript()[0].kind, MessageKind::System);
        assert_eq!(d.session().typing_shown_count(), 0);
    }

    #[test]
    fn unknown_entry_fragment_falls_back_to_home_without_animation() {
        let d = started("#nowhere");
        assert_eq!(d.session().current(), &id("welcome"));
        assert_eq!(d.session().location().fragment(), "#nowhere", "entry fragment is not rewritten");
        assert_eq!(bodies(&d), vec!["w0", "w1"]);
        assert!(d.session().entry_had_channel());
    }

    #[test]
    fn empty_channel_yields_exactly_one_placeholder() {
        let mut d = started("#about");
        d.session_mut().switch_to(&id("tavern"), SwitchOrigin::User);
        assert!(bodies(&d).is_empty(), "placeholder waits for the typing indicator");
        assert!(d.session().is_typing());
        d.settle();
        assert_eq!(bodies(&d), vec!["Welcome to the #tavern channel. This channel has no content yet."]);
    }

    #[test]
    fn interrupted_reveals_never_fire() {
        let mut d = started("#features");
        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        d.advance(1000);
        assert_eq!(bodies(&d), vec!["a0"]);

        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        assert_eq!(bodies(&d), vec!["f0"], "features was cached by the deep link");
        d.advance(300);

        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        assert!(bodies(&d).is_empty(), "about never finished, so it reloads from scratch");
        // a1 would have been due at 2200 and a2 at 3400 on the first pass.
        d.advance(1000);
        assert_eq!(bodies(&d), vec!["a0"]);
        d.settle();
        assert_eq!(bodies(&d), vec!["a0", "a1", "a2"]);
    }

    #[test]
    fn operation_from_an_older_generation_is_dropped() {
        let mut d = started("#about");
        let stale = d.session().generation();
        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        let now = d.session().now_ms();
        let owner = id("features");
        d.session_mut().scheduler.schedule(
            now,
            OperationKind::Reveal { message: MessageTemplate::new("stale") },
            &owner,
            stale,
        );
        d.session_mut().tick();
        assert!(!bodies(&d).contains(&"stale".to_string()));
    }

    #[test]
    fn operation_owned_by_another_channel_is_dropped() {
        let mut d = started("#about");
        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        let now = d.session().now_ms();
        let generation = d.session().generation();
        d.session_mut().scheduler.schedule(
            now,
            OperationKind::ShowTyping { duration_ms: 1000 },
            &id("about"),
            generation,
        );
        d.session_mut().tick();
        assert!(!d.session().is_typing());
    }

    #[test]
    fn revisit_is_served_from_cache_byte_identical() {
        let mut d = started("#features");
        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        d.settle();
        let first = hash_messages(d.session().transcript());
        let shown = d.session().typing_shown_count();

        d.advance(120_000);
        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);

        assert_eq!(hash_messages(d.session().transcript()), first);
        assert_eq!(d.session().typing_shown_count(), shown, "cache hit never shows typing");
        assert!(!d.session().is_animating());
        assert_eq!(d.session().cache().get(&id("about")).unwrap().digest(), first);
    }

    #[test]
    fn timestamps_are_taken_at_reveal() {
        let timings = Timings { typing_ms: 60_000, gap_ms: 0, interface_delay_ms: 0 };
        let mut d = driver_with_small_registry(timings);
        d.session_mut().start("");
        d.settle();
        let stamps: Vec<&str> = d.session().transcript().iter().map(|m| m.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["12:01 AM", "12:02 AM"]);
    }

    #[test]
    fn slash_command_switches_and_writes_location() {
        let mut d = started("#about");
        d.session_mut().drain_events();
        let parsed = d.session_mut().submit("/features");
        assert_eq!(parsed, Some(ParsedCommand::SwitchChannel(id("features"))));
        assert_eq!(d.session().current(), &id("features"));
        assert_eq!(d.session().location().fragment(), "#features");
        let events = d.session_mut().drain_events();
        assert!(events.contains(&SessionEvent::ChannelChanged(id("features"))));
        assert!(events.contains(&SessionEvent::LocationChanged("#features".into())));
    }

    #[test]
    fn unknown_command_replies_without_switching() {
        let mut d = started("#about");
        let before = d.session().generation();
        d.session_mut().submit("/doesnotexist");
        d.settle();
        assert_eq!(d.session().current(), &id("about"));
        assert_eq!(d.session().generation(), before);
        let reply = &d.session().transcript().last().unwrap().body;
        assert!(reply.starts_with("Unknown command: /doesnotexist."));
        for name in ["about", "how-to-play", "features", "welcome", "live-discord", "help"] {
            assert!(reply.contains(&format!("/{name}<")), "missing {name}");
        }
    }

    #[test]
    fn free_text_gets_demo_reply_and_is_cached() {
        let mut d = started("#about");
        d.session_mut().submit("hello?");
        assert!(d.session().is_typing());
        d.settle();
        assert_eq!(bodies(&d).len(), 4);
        assert!(bodies(&d)[3].starts_with("This is a demonstration"));

        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        assert_eq!(bodies(&d).len(), 4, "reply replaced the cache entry wholesale");
    }

    #[test]
    fn help_lists_descriptions() {
        let mut d = started("#about");
        d.session_mut().submit("/help");
        d.settle();
        let reply = &d.session().transcript().last().unwrap().body;
        assert!(reply.contains("Discover game features"));
    }

    #[test]
    fn blank_submit_does_nothing() {
        let mut d = started("#about");
        assert_eq!(d.session_mut().submit("   "), None);
        assert!(!d.session().is_animating());
    }

    #[test]
    fn back_and_forward_switch_without_rewriting_location() {
        let mut d = started("#about");
        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        d.session_mut().drain_events();

        assert!(d.session_mut().back());
        assert_eq!(d.session().current(), &id("about"));
        assert_eq!(d.session().location().fragment(), "#about");
        assert!(d.session().location().can_go_forward(), "navigation did not push a new entry");
        let events = d.session_mut().drain_events();
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::LocationChanged(_))));

        assert!(d.session_mut().forward());
        assert_eq!(d.session().current(), &id("features"));
        assert!(!d.session_mut().forward());
    }

    #[test]
    fn navigate_to_current_channel_is_a_no_op() {
        let mut d = started("#about");
        let generation = d.session().generation();
        assert!(!d.session_mut().navigate("#about"));
        assert_eq!(d.session().generation(), generation);
    }

    #[test]
    fn unknown_command_echoes_placeholder_text_verbatim() {
        let mut d = started("#about");
        d.session_mut().submit("/{commands}");
        d.settle();
        let reply = &d.session().transcript().last().unwrap().body;
        assert!(reply.starts_with("Unknown command: /{commands}. Available commands are: "));
        assert_eq!(reply.matches("/about<").count(), 1, "command list appears once");
    }

    #[test]
    fn unknown_command_escapes_typed_markup() {
        let mut d = started("#about");
        d.session_mut().submit("/<em>x");
        d.settle();
        let reply = &d.session().transcript().last().unwrap().body;
        assert!(reply.starts_with("Unknown command: /&lt;em&gt;x. Available"));
        assert!(!reply.contains("<em>"));
    }

    #[test]
    fn navigate_to_unknown_fragment_goes_home() {
        let mut d = started("#about");
        assert!(d.session_mut().navigate("#missing"));
        assert_eq!(d.session().current(), &id("welcome"));
    }

    struct Broken;

    impl TemplateSource for Broken {
        fn load(&self, channel: &ChannelId) -> Result<Option<Vec<MessageTemplate>>, TemplateError> {
            if channel.as_str() == "about" {
                let source = serde_yaml::from_str::<Vec<MessageTemplate>>("[").unwrap_err();
                return Err(TemplateError::Parse { name: channel.content_key(), source });
            }
            Ok(Some(vec![MessageTemplate::new("x0"), MessageTemplate::new("x1")]))
        }
    }

    #[test]
    fn failed_switch_leaves_session_untouched() {
        let config = SessionConfig::embedded(Timings::default()).unwrap();
        let mut d = ReplayDriver::new(config, Box::new(Broken));
        d.session_mut().start("");
        d.advance(1000);
        let generation = d.session().generation();

        assert!(!d.session_mut().switch_to(&id("about"), SwitchOrigin::User));
        assert_eq!(d.session().current(), &id("welcome"));
        assert_eq!(d.session().generation(), generation);
        assert_eq!(bodies(&d), vec!["x0"]);
        assert!(d.session().is_animating(), "the running animation keeps going");
        d.settle();
        assert_eq!(bodies(&d), vec!["x0", "x1"]);
    }

    #[test]
    fn invalid_channel_name_is_an_error() {
        let mut d = started("#about");
        let err = d.session_mut().try_switch_to_name("Not Valid", SwitchOrigin::User).unwrap_err();
        assert!(matches!(err, SessionError::ChannelId(_)));
        assert_eq!(d.session().current(), &id("about"));
    }

    #[test]
    fn switch_forces_typing_hidden() {
        let mut d = started("");
        assert!(d.session().is_typing());
        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        d.advance(1000);
        assert!(!d.session().is_typing());
        d.session_mut().switch_to(&id("about"), SwitchOrigin::User);
        assert!(d.session().is_typing(), "fresh sequence starts typing");
        d.session_mut().switch_to(&id("features"), SwitchOrigin::User);
        assert!(!d.session().is_typing(), "cache hit hides the indicator");
    }

    #[test]
    fn next_deadline_tracks_scheduler_and_typing() {
        let d = started("");
        assert_eq!(d.session().next_deadline(), Some(1000));
        let idle = started("#about");
        assert_eq!(idle.session().next_deadline(), None);
    }
}
