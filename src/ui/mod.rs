//! Text rendering for the terminal front end.

mod display;
mod help;

pub use display::{DISPLAY_WIDTH, render_display, render_keypad};
pub use help::HELP_TEXT;
