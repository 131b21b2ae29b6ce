/// The location indicator (`#channel`) and its back/forward history.
///
/// `push` is what the app does when it switches channels itself. `back`/`forward` model the user
/// walking history; the caller turns those into navigation-origin switches.
#[derive(Debug, Clone)]
pub struct Location {
    entries: Vec<String>,
    cursor: usize,
}

impl Location {
    /// Start at the entry fragment exactly as given, even if it names no known channel.
    pub fn new(entry_fragment: &str) -> Self {
        Self { entries: vec![normalize(entry_fragment)], cursor: 0 }
    }

    pub fn fragment(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Fragment without the leading `#`.
    pub fn target(&self) -> &str {
        strip_hash(self.fragment())
    }

    /// Record a programmatic fragment change. Drops forward history, like a browser.
    pub fn push(&mut self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        if fragment == self.fragment() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment);
        self.cursor += 1;
        true
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.fragment())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.fragment())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

pub fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

fn normalize(fragment: &str) -> String {
    let bare = strip_hash(fragment.trim());
    if bare.is_empty() { String::new() } else { format!("#{bare}") }
}
