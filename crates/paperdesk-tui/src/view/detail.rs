use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use paperdesk_api::Paper;

use crate::app::App;
use crate::theme::Theme;

/// Render the detail side panel for the paper under the cursor.
/// Selection never triggers a re-fetch; this renders the list record as-is.
pub fn render_panel(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Paper Details ");

    let Some(paper) = app.selected_paper() else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No paper selected",
                Style::default().fg(theme.dim),
            )),
        ];
        f.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let lines = paper_lines(paper, theme);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Full-record lines: title, authors, abstract, tags, source link,
/// identifiers, date.
fn paper_lines<'a>(paper: &'a Paper, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(
        paper.title.as_str(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ))];

    lines.push(Line::from(""));
    lines.push(field_header("Authors", theme));
    if paper.authors.is_empty() {
        lines.push(dim_line("Unknown", theme));
    } else {
        for author in &paper.authors {
            lines.push(Line::from(Span::styled(
                format!("  {author}"),
                Style::default().fg(theme.text),
            )));
        }
    }

    if !paper.abstract_text.is_empty() {
        lines.push(Line::from(""));
        lines.push(field_header("Abstract", theme));
        lines.push(Line::from(Span::styled(
            paper.abstract_text.as_str(),
            Style::default().fg(theme.text),
        )));
    }

    lines.push(Line::from(""));
    lines.push(field_header("Tags", theme));
    if paper.tags.is_empty() {
        lines.push(dim_line("No tags", theme));
    } else {
        let mut spans = vec![Span::raw("  ")];
        for (i, tag) in paper.tags.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("#{tag}"),
                Style::default().fg(theme.tag),
            ));
        }
        lines.push(Line::from(spans));
    }

    if let Some(url) = &paper.file_url {
        lines.push(Line::from(""));
        lines.push(field_header("Source", theme));
        lines.push(Line::from(Span::styled(
            format!("  {url}"),
            Style::default().fg(theme.accent),
        )));
    }

    lines.push(Line::from(""));
    lines.push(field_header("Paper ID", theme));
    lines.push(dim_line(&paper.paper_id, theme));

    lines.push(Line::from(""));
    lines.push(field_header("Added", theme));
    lines.push(Line::from(Span::styled(
        format!("  {}", paper.created_short()),
        Style::default().fg(theme.text),
    )));

    lines
}

fn field_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn dim_line<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default().fg(theme.dim),
    ))
}
