use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::App;
use crate::model::upload::UploadPhase;
use crate::theme::Theme;
use crate::view::spinner_char;

/// Render the Upload screen: current directory, PDF picker, result panel,
/// footer.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let picker = &app.file_picker;

    let chunks = Layout::vertical([
        Constraint::Length(1), // current dir
        Constraint::Min(5),    // file list
        Constraint::Length(10), // upload state panel
    ])
    .split(area);

    // Current directory
    let dir_line = Line::from(vec![
        Span::styled(" \u{1F4C1} ", Style::default().fg(theme.accent)),
        Span::styled(
            picker.current_dir.display().to_string(),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(dir_line), chunks[0]);

    // File list: directories and PDFs are actionable, the rest is dimmed.
    let visible_height = chunks[1].height.saturating_sub(2) as usize;
    let scroll_offset = if picker.cursor >= visible_height {
        picker.cursor - visible_height + 1
    } else {
        0
    };

    let selected_path = app.upload.selected_path();
    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|entry| {
            let (icon, style) = if entry.is_dir {
                ("\u{1F4C1} ", Style::default().fg(theme.accent))
            } else if entry.is_pdf {
                if selected_path.is_some_and(|p| p == &entry.path) {
                    (
                        "\u{2713} ",
                        Style::default().fg(theme.ok).add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("\u{1F4C4} ", Style::default().fg(theme.text))
                }
            } else {
                ("  ", Style::default().fg(theme.dim))
            };
            ListItem::new(Line::from(vec![
                Span::styled(icon, style),
                Span::styled(&entry.name, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Select a PDF "),
        )
        .highlight_style(theme.highlight_style());

    let mut state = ListState::default();
    state.select(Some(picker.cursor.saturating_sub(scroll_offset)));
    f.render_stateful_widget(list, chunks[1], &mut state);

    render_state_panel(f, chunks[2], app, theme);

    let footer_text = match app.upload.phase {
        UploadPhase::Selected(_) => " j/k:navigate  Enter:select  r:upload & process  Esc:back  q:quit",
        _ => " j/k:navigate  Enter:open dir / select PDF  Esc:back  q:quit",
    };
    f.render_widget(
        Paragraph::new(Span::styled(footer_text, theme.footer_style())),
        footer_area,
    );
}

/// The local state machine panel: selected file, in-flight spinner, the
/// returned record on success (including key findings), or the error.
fn render_state_panel(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let lines = match &app.upload.phase {
        UploadPhase::NoFile => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No file selected",
                Style::default().fg(theme.dim),
            )),
            Line::from(Span::styled(
                "  Navigate to a PDF and press Enter to select it",
                Style::default().fg(theme.dim),
            )),
        ],
        UploadPhase::Selected(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            let size = std::fs::metadata(path)
                .map(|m| format!("{:.2} MB", m.len() as f64 / (1024.0 * 1024.0)))
                .unwrap_or_default();
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(
                        format!("  \u{1F4C4} {name}"),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {size}"), Style::default().fg(theme.dim)),
                ]),
                Line::from(Span::styled(
                    "  Press r to upload & process",
                    Style::default().fg(theme.accent),
                )),
            ]
        }
        UploadPhase::Uploading(name) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {} Processing {name}...", spinner_char(app.tick)),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
        UploadPhase::Succeeded(paper) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "  \u{2713} Upload successful",
                    Style::default().fg(theme.ok).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", paper.title),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
            ];
            if !paper.authors.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", paper.authors.join(", ")),
                    Style::default().fg(theme.dim),
                )));
            }
            if !paper.tags.is_empty() {
                let tags: Vec<String> = paper.tags.iter().map(|t| format!("#{t}")).collect();
                lines.push(Line::from(Span::styled(
                    format!("  {}", tags.join(" ")),
                    Style::default().fg(theme.tag),
                )));
            }
            if !paper.key_findings.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  Key findings:",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )));
                for finding in &paper.key_findings {
                    lines.push(Line::from(Span::styled(
                        format!("   \u{2022} {finding}"),
                        Style::default().fg(theme.text),
                    )));
                }
            }
            lines
        }
        UploadPhase::Failed(error) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  \u{2717} Upload failed",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.error),
            )),
        ],
    };

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.border_style()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}
