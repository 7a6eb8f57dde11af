use ratatui::style::Color;

use crate::stats::Grade;

/// Colours for one of the two display themes.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub border: Color,
    pub correct: Color,
    pub wrong: Color,
}

impl Palette {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::Yellow,
                border: Color::DarkGray,
                correct: Color::Green,
                wrong: Color::Red,
            }
        } else {
            Self {
                background: Color::Reset,
                text: Color::Reset,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::Magenta,
                border: Color::Gray,
                correct: Color::Green,
                wrong: Color::Red,
            }
        }
    }

    pub fn grade(&self, percentage: u32) -> Color {
        match Grade::from_percentage(percentage) {
            Grade::Good => self.correct,
            Grade::Fair => Color::Yellow,
            Grade::Poor => self.wrong,
        }
    }
}
