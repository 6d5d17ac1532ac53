use ratatui::style::{Color, Modifier, Style};

/// Colors shared by every dashboard view
pub struct Theme;

impl Theme {
    /// Borders and inactive tabs
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Day chart bars
    pub fn primary() -> Color {
        Color::Magenta
    }

    /// Week line and card values
    pub fn accent() -> Color {
        Color::LightBlue
    }

    pub fn success() -> Color {
        Color::Green
    }

    pub fn danger() -> Color {
        Color::Red
    }

    pub fn warn() -> Color {
        Color::Yellow
    }

    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_tab() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::secondary())
            .add_modifier(Modifier::BOLD)
    }
}
