use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::view::truncate;

/// Render the Library screen: search bar, paper table, detail side panel,
/// status/footer rows.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let has_search = app.input_mode == InputMode::Search || !app.search_query.is_empty();

    let mut constraints = Vec::new();
    if has_search {
        constraints.push(Constraint::Length(1)); // search bar
    }
    constraints.push(Constraint::Min(5)); // table + detail panel
    constraints.push(Constraint::Length(1)); // status line

    let chunks = Layout::vertical(constraints).split(area);
    let mut chunk_idx = 0;

    if has_search {
        render_search_bar(f, chunks[chunk_idx], app);
        chunk_idx += 1;
    }

    // Detail panel on the right, like the original's sticky side panel.
    let body = chunks[chunk_idx];
    let panel_width = if body.width > 120 {
        48
    } else {
        (body.width / 3).max(30)
    };
    let split = Layout::horizontal([Constraint::Min(40), Constraint::Length(panel_width)])
        .split(body);

    render_table(f, split[0], app);
    crate::view::detail::render_panel(f, split[1], app);

    render_status(f, chunks[chunk_idx + 1], app);
    render_footer(f, footer_area, app);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::Search;
    let cursor = if editing { "\u{2588}" } else { "" };
    let line = Line::from(vec![
        Span::styled(" /", Style::default().fg(theme.accent)),
        Span::styled(
            format!("{}{}", app.search_query, cursor),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("   {} of {} papers", app.filtered.len(), app.papers.len()),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    if app.filtered.is_empty() {
        render_empty(f, area, app, theme);
        return;
    }

    let title_width = (area.width as usize).saturating_sub(44).max(20);
    let rows: Vec<Row> = app
        .filtered
        .iter()
        .map(|&i| {
            let paper = &app.papers[i];
            let authors = match paper.authors.len() {
                0 => "Unknown".to_string(),
                1 => paper.authors[0].clone(),
                2 => paper.authors.join(", "),
                _ => format!("{}, {}...", paper.authors[0], paper.authors[1]),
            };
            Row::new(vec![
                Cell::from(truncate(&paper.title, title_width))
                    .style(Style::default().fg(theme.text)),
                Cell::from(truncate(&authors, 24)).style(Style::default().fg(theme.dim)),
                Cell::from(paper.created_short()).style(Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Title", "Authors", "Added"]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(24),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" Your Papers ({}) ", app.filtered.len())),
    )
    .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let (headline, hint) = if app.papers.is_empty() {
        if app.loaded_once {
            (
                "No papers uploaded yet",
                "Press u to upload your first research paper",
            )
        } else {
            ("Loading your papers...", "")
        }
    } else {
        ("No papers match your search", "Try adjusting your search terms")
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {headline}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {hint}"),
            Style::default().fg(theme.dim),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Your Papers ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(status) = &app.status else { return };
    let style = if status.contains("failed") || status.contains("Please select") {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.ok)
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {status}"), style)),
        area,
    );
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = if app.input_mode == InputMode::Search {
        " type to filter  Enter:keep  Esc:clear"
    } else {
        " j/k:navigate  Enter:chat  u:upload  d:delete  /:search  R:refresh  ?:help  q:quit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(footer_text, app.theme.footer_style())),
        area,
    );
}
