//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::present::{Band, Trend};

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const TAB_ACTIVE: Color = Color::Cyan;
    pub const TAB_INACTIVE: Color = Color::Gray;

    // Severity bands
    pub const BAND_LOW: Color = Color::Red;
    pub const BAND_MEDIUM: Color = Color::Yellow;
    pub const BAND_HIGH: Color = Color::Green;

    // Card text
    pub const STAFF: Color = Color::Cyan;
    pub const SPECIAL: Color = Color::Yellow;
    pub const VACANT: Color = Color::LightRed;
    pub const JOINED: Color = Color::LightBlue;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning text in the header (fetch failures).
    pub fn header_warning() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active tab style.
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::TAB_ACTIVE)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Inactive tab style.
    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TAB_INACTIVE)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Card border style for a severity band.
    pub fn band(band: Band) -> Style {
        let color = match band {
            Band::Low => Theme::BAND_LOW,
            Band::Medium => Theme::BAND_MEDIUM,
            Band::High => Theme::BAND_HIGH,
        };
        Style::default().fg(color)
    }

    /// Card title style.
    pub fn card_title(band: Band) -> Style {
        Self::band(band).add_modifier(Modifier::BOLD)
    }

    /// Current-percentage style by trend.
    pub fn trend(trend: Trend) -> Style {
        match trend {
            Trend::Up => Style::default().fg(Color::Green),
            Trend::Down => Style::default().fg(Color::Red),
            Trend::Same => Style::default().fg(Theme::FG_DIM),
        }
    }

    pub fn staff() -> Style {
        Style::default()
            .fg(Theme::STAFF)
            .add_modifier(Modifier::BOLD)
    }

    pub fn special() -> Style {
        Style::default().fg(Theme::SPECIAL)
    }

    pub fn vacant() -> Style {
        Style::default().fg(Theme::VACANT)
    }

    pub fn joined() -> Style {
        Style::default().fg(Theme::JOINED)
    }

    /// Error text (inline fetch errors).
    pub fn error() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }
}
