use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
pub struct Theme {
    pub accent: Color,
    pub ok: Color,
    pub error: Color,
    pub tag: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub user_bubble: Color,
    pub assistant_bubble: Color,
    pub footer_fg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            accent: Color::Cyan,
            ok: Color::Rgb(0, 210, 0),
            error: Color::Red,
            tag: Color::Yellow,

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(30, 50, 30),
            user_bubble: Color::Cyan,
            assistant_bubble: Color::White,
            footer_fg: Color::DarkGray,
        }
    }

    /// Modern theme: white text, electric blue accents.
    pub fn modern() -> Self {
        Self {
            accent: Color::Rgb(60, 140, 255),
            ok: Color::Rgb(0, 200, 80),
            error: Color::Rgb(255, 80, 80),
            tag: Color::Rgb(255, 200, 0),

            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(30, 40, 80),
            user_bubble: Color::Rgb(60, 140, 255),
            assistant_bubble: Color::White,
            footer_fg: Color::Rgb(120, 120, 140),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg)
    }
}
