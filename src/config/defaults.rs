//! Default values for every configuration key.
//!
//! These match what a popup looks like with no configuration file at all.

// ==========================================================================
// Colors and font
// ==========================================================================

pub const DEFAULT_BACKGROUND_COLOR: &str = "#3e3e3e";
pub const DEFAULT_BORDER_COLOR: &str = "#ececec";
pub const DEFAULT_FONT_COLOR: &str = "#ececec";

/// X core font pattern. Falls back to [`FALLBACK_FONT`] when not installed.
pub const DEFAULT_FONT: &str = "-misc-fixed-medium-r-normal--20-*-*-*-*-*-iso10646-1";

/// Alias every X server is required to provide.
pub const FALLBACK_FONT: &str = "fixed";

// ==========================================================================
// Geometry (pixels)
// ==========================================================================

pub const DEFAULT_LINE_SPACING: u32 = 5;

/// Inner padding around the text, also used as the gap between stacked popups.
pub const DEFAULT_PADDING: u32 = 15;

pub const DEFAULT_WIDTH: u32 = 450;
pub const DEFAULT_BORDER_SIZE: u32 = 2;
pub const DEFAULT_POS_X: u32 = 30;
pub const DEFAULT_POS_Y: u32 = 60;

// ==========================================================================
// Behaviour
// ==========================================================================

/// Seconds before the popup dismisses itself. 0 keeps it open.
pub const DEFAULT_DURATION_SECS: u32 = 5;

pub const DEFAULT_DISMISS_BUTTON: u8 = 1;
pub const DEFAULT_ACTION_BUTTON: u8 = 2;
