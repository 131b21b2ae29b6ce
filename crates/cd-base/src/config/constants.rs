// =============================================================================
// ANIMATION TIMING
// =============================================================================

/// How long the typing indicator shows before each message is revealed
pub const TYPING_DURATION_MS: u64 = 1000;

/// Pause between one reveal and the next message's typing indicator
pub const INTER_MESSAGE_GAP_MS: u64 = 200;

/// Delay after the home channel's last reveal before the sidebar and input appear
pub const INTERFACE_SHOW_DELAY_MS: u64 = 500;

/// Longest single `:wait` a replay script may ask for (one day)
pub const MAX_WAIT_MS: u64 = 24 * 60 * 60 * 1000;

// =============================================================================
// MESSAGES
// =============================================================================

/// Author used when a template does not name one
pub const DEFAULT_AUTHOR: &str = "Channel Dungeons";

/// Display format for reveal timestamps ("03:41 PM")
pub const TIMESTAMP_FORMAT: &str = "%I:%M %p";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Directory holding `{channel}-content.yaml` overrides
pub const ENV_CONTENT_DIR: &str = "CHANNEL_DUNGEONS_CONTENT_DIR";

/// Override for [`TYPING_DURATION_MS`]
pub const ENV_TYPING_MS: &str = "CHANNEL_DUNGEONS_TYPING_MS";

/// Override for [`INTER_MESSAGE_GAP_MS`]
pub const ENV_GAP_MS: &str = "CHANNEL_DUNGEONS_GAP_MS";

/// Suffix of the content block naming convention
pub const CONTENT_BLOCK_SUFFIX: &str = "-content";

/// Tracing filter for the log file (`info` when unset)
pub const ENV_LOG: &str = "CHANNEL_DUNGEONS_LOG";

// =============================================================================
// STORAGE
// =============================================================================

/// Working directory for logs and crash reports
pub const STORE_DIR: &str = ".channel-dungeons";

pub const LOGS_DIR: &str = "logs";
pub const ERRORS_DIR: &str = "errors";
pub const LOG_FILE: &str = "channel-dungeons.log";

// =============================================================================
// UI LAYOUT
// =============================================================================

/// Terminals narrower than this use the overlay sidebar
pub const NARROW_BREAKPOINT: u16 = 100;

/// Sidebar width in characters
pub const SIDEBAR_WIDTH: u16 = 28;

/// Channel rows start below the "CHANNELS" header and a blank line
pub const CHANNEL_LIST_START_ROW: u16 = 2;

/// Lines scrolled per arrow/wheel step and per page
pub const SCROLL_LINE_AMOUNT: u16 = 3;
pub const SCROLL_PAGE_AMOUNT: u16 = 10;

/// Poll timeout when nothing is scheduled
pub const IDLE_POLL_MS: u64 = 250;
