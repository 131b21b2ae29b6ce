use ratatui::style::Color;

// Primary brand colors
pub const ACCENT: Color = Color::Rgb(88, 101, 242);        // #5865F2 - blurple
pub const ACCENT_DIM: Color = Color::Rgb(71, 82, 196);     // Dimmed blurple
pub const SUCCESS: Color = Color::Rgb(35, 165, 90);        // Online green
pub const WARNING: Color = Color::Rgb(240, 178, 50);       // Warm amber

// Text colors
pub const TEXT: Color = Color::Rgb(242, 243, 245);         // #f2f3f5 - primary text
pub const TEXT_SECONDARY: Color = Color::Rgb(181, 186, 193); // Secondary text
pub const TEXT_MUTED: Color = Color::Rgb(128, 132, 142);   // #80848e - timestamps, hints

// Background colors
pub const BG_BASE: Color = Color::Rgb(30, 31, 34);         // #1e1f22 - darkest background
pub const BG_SIDEBAR: Color = Color::Rgb(43, 45, 49);      // #2b2d31 - channel list
pub const BG_SURFACE: Color = Color::Rgb(49, 51, 56);      // #313338 - conversation
pub const BG_ELEVATED: Color = Color::Rgb(64, 66, 73);     // Selected rows, code
pub const BG_INPUT: Color = Color::Rgb(56, 58, 64);        // #383a40 - input field

// Border colors
pub const BORDER: Color = Color::Rgb(64, 66, 73);
pub const BORDER_FOCUS: Color = Color::Rgb(88, 101, 242);

// Message colors
pub const AUTHOR: Color = Color::Rgb(242, 63, 67);         // Bot name red
pub const SYSTEM: Color = Color::Rgb(0, 168, 252);         // System message blue
pub const COMMAND: Color = Color::Rgb(201, 205, 251);      // Inline /command chip
pub const LINK: Color = Color::Rgb(0, 168, 252);
pub const CODE: Color = Color::Rgb(235, 152, 120);
