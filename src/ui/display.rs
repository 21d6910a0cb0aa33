//! Display rendering.
//!
//! The expression sits in a muted line above the numeric readout, both right
//! aligned inside a fixed-width frame.

use crate::calculator::KEYPAD;
use crate::session::Readout;

/// Inner width of the display frame, in characters.
pub const DISPLAY_WIDTH: usize = 28;

/// Render the readout as a framed two-line display.
pub fn render_display(readout: &Readout) -> String {
    let border = "─".repeat(DISPLAY_WIDTH + 2);
    format!(
        "┌{border}┐\n│ {} │\n│ {} │\n└{border}┘",
        fit(&readout.expression),
        fit(&readout.display),
    )
}

/// Render the keypad grid.
pub fn render_keypad() -> String {
    KEYPAD
        .iter()
        .map(|row| {
            row.iter()
                .map(|label| format!("[{label:^3}]"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Right-align `text` in the frame, keeping its tail when it is too long.
fn fit(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() > DISPLAY_WIDTH {
        let tail: String = chars[chars.len() - (DISPLAY_WIDTH - 1)..].iter().collect();
        format!("…{tail}")
    } else {
        format!("{:>width$}", text, width = DISPLAY_WIDTH)
    }
}
