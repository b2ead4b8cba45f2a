use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;
pub const DROP_TARGET_BORDER: Color = Color::Green;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const GHOST_TEXT: Color = Color::DarkGray;
pub const TAG_TEXT: Color = Color::LightBlue;

pub const PRIORITY_HIGH: Color = Color::LightRed;
pub const PRIORITY_MEDIUM: Color = Color::Yellow;
pub const PRIORITY_LOW: Color = Color::Green;

pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
