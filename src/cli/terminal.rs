//! Colour for terminal output

use std::fmt::Display;

use owo_colors::{OwoColorize, colors::css};

/// How a piece of output should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something went right (green).
    Good,
    /// Something needs attention (amber).
    Bad,
    /// Neutral emphasis (blue).
    Note,
    /// De-emphasised detail.
    Muted,
}

/// Whether stdout accepts colour.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Renders `text` in `tone`, or plain when colour is unavailable.
pub fn paint(text: impl Display, tone: Tone) -> String {
    if !supports_color() {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.fg::<css::Green>().to_string(),
        Tone::Bad => text.fg::<css::Orange>().to_string(),
        Tone::Note => text.fg::<css::LightBlue>().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

/// `YES` in green or `NO` in amber.
pub fn availability(available: bool) -> String {
    if available {
        paint("YES", Tone::Good)
    } else {
        paint("NO", Tone::Bad)
    }
}
