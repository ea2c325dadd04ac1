use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Screen};
use crate::view::spinner_char;

/// Persistent one-line header: app name, current screen, refresh indicator,
/// and the session identity right-aligned.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let screen_label = match app.screen {
        Screen::Library => "Library",
        Screen::Upload => "Upload",
        Screen::Chat => "Chat",
    };

    let mut spans = vec![
        Span::styled(" paperdesk ", theme.header_style()),
        Span::styled(
            format!(" {screen_label}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ];
    if app.list_pending {
        spans.push(Span::styled(
            format!("  {} syncing...", spinner_char(app.tick)),
            Style::default().fg(theme.accent),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    // Identity, right-aligned in the same row.
    let identity = format!("session {} ", app.identity);
    let width = identity.chars().count() as u16;
    if area.width > width {
        let right = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        f.render_widget(
            Paragraph::new(Span::styled(identity, Style::default().fg(theme.dim))),
            right,
        );
    }
}
