use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::model::chat::{ChatState, FetchPhase, Role};
use crate::theme::Theme;
use crate::view::spinner_char;

/// Render the Chat screen: paper header, transcript, compose bar.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let Some(chat) = &app.chat else { return };

    let chunks = Layout::vertical([
        Constraint::Length(4), // paper header
        Constraint::Min(5),    // transcript
        Constraint::Length(3), // compose bar
    ])
    .split(area);

    render_paper_header(f, chunks[0], chat, app.tick, theme);
    render_transcript(f, chunks[1], chat, app.tick, theme);
    render_compose(f, chunks[2], chat, theme);

    f.render_widget(
        Paragraph::new(Span::styled(
            " type your question  Enter:send  Esc:back to papers",
            theme.footer_style(),
        )),
        footer_area,
    );
}

/// Loading, found, missing, and failed fetches each render distinctly;
/// an absent record is not a transport failure.
fn render_paper_header(f: &mut Frame, area: Rect, chat: &ChatState, tick: usize, theme: &Theme) {
    let lines = match &chat.fetch {
        FetchPhase::Loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {} Loading paper...", spinner_char(tick)),
                Style::default().fg(theme.accent),
            )),
        ],
        FetchPhase::Found(paper) => {
            let mut lines = vec![Line::from(Span::styled(
                format!(" Chat about: {}", paper.title),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ))];
            if !paper.authors.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!(" {}", paper.authors.join(", ")),
                    Style::default().fg(theme.dim),
                )));
            }
            lines.push(Line::from(Span::styled(
                " Ask questions about this paper",
                Style::default().fg(theme.dim),
            )));
            lines
        }
        FetchPhase::Missing => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Paper not found",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  It may have been deleted. Press Esc to go back.",
                Style::default().fg(theme.dim),
            )),
        ],
        FetchPhase::Failed(error) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Could not load paper",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.dim),
            )),
        ],
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style());
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_transcript(f: &mut Frame, area: Rect, chat: &ChatState, tick: usize, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();

    if chat.messages.is_empty() && !chat.pending {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Start a conversation!",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "  Ask me anything about this paper.",
            Style::default().fg(theme.dim),
        )));
    }

    for message in &chat.messages {
        let (label, color) = match message.role {
            Role::User => ("you", theme.user_bubble),
            Role::Assistant => ("ai ", theme.assistant_bubble),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {label} \u{2502} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.text.as_str(), Style::default().fg(theme.text)),
        ]));
        lines.push(Line::from(""));
    }

    // Exactly one pending indicator per outstanding question.
    if chat.pending {
        lines.push(Line::from(Span::styled(
            format!(" ai  \u{2502} {}", spinner_char(tick)),
            Style::default().fg(theme.accent),
        )));
    }

    // Keep the tail of the transcript in view.
    let visible = area.height as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        area,
    );
}

fn render_compose(f: &mut Frame, area: Rect, chat: &ChatState, theme: &Theme) {
    let input = Line::from(vec![
        Span::styled(
            format!("{}\u{2588}", chat.compose),
            Style::default().fg(theme.text),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if chat.pending {
            theme.border_style()
        } else {
            Style::default().fg(theme.accent)
        })
        .title(" Ask a question about this paper ");
    f.render_widget(Paragraph::new(input).block(block), area);
}
