//! The UI renders the application state into something visible and scrollable.
//!
//! The screen is split into the sidebar (chapters with the page outline under the active one),
//! the document, and a help bar. With threshold debugging on, the decision line is drawn across
//! the document along with a table of the tracker's internals.

use crate::app_state::{AppState, Focus};
use crate::sidebar::SidebarRow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};

struct Areas {
    sidebar: Rect,
    document: Rect,
    help: Rect,
}

fn split(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Min(0)])
        .split(rows[0]);
    Areas {
        sidebar: columns[0],
        document: columns[1],
        help: rows[1],
    }
}

#[must_use]
/// Rows available inside the document and sidebar panes for a terminal of the given size.
pub fn pane_heights(area: Rect) -> (usize, usize) {
    let areas = split(area);
    (
        usize::from(areas.document.height.saturating_sub(2)),
        usize::from(areas.sidebar.height.saturating_sub(2)),
    )
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &AppState) {
    let areas = split(f.area());
    draw_sidebar(f, app, areas.sidebar);
    draw_document(f, app, areas.document);
    draw_help(f, app, areas.help);
}

fn draw_sidebar(f: &mut Frame, app: &AppState, area: Rect) {
    let sidebar = &app.sidebar;
    let navigator = sidebar.navigator();
    let current = navigator.and_then(|n| n.outline().active());

    let items: Vec<ListItem> = sidebar
        .rows()
        .into_iter()
        .enumerate()
        .skip(app.sidebar_scroll)
        .take(app.sidebar_height)
        .map(|(i, row)| {
            let indent = "  ".repeat(row.depth());
            let (marker, label, mut style) = match row {
                SidebarRow::Chapter { index, .. } => {
                    let chapter = &sidebar.chapters().chapters()[index];
                    let marker = match (sidebar.chapters().is_foldable(index), chapter.expanded) {
                        (false, _) => "  ",
                        (true, true) => "▾ ",
                        (true, false) => "▸ ",
                    };
                    let style = if sidebar.active_chapter() == Some(index) {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    (marker, chapter.title.clone(), style)
                }
                SidebarRow::Heading { node, .. } => {
                    let outline = navigator.map(|n| (n.outline(), n.headings()));
                    let (marker, label) = outline
                        .and_then(|(outline, headings)| {
                            let entry = outline.node(node)?;
                            let heading = headings.get(entry.heading?)?;
                            let marker = match (entry.foldable, entry.expanded) {
                                (false, _) => "  ",
                                (true, true) => "▾ ",
                                (true, false) => "▸ ",
                            };
                            Some((marker, heading.title.clone()))
                        })
                        .unwrap_or(("  ", String::new()));
                    let style = if current == Some(node) {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    (marker, label, style)
                }
            };

            if app.focus == Focus::Sidebar && i == app.sidebar_selection {
                style = style.add_modifier(Modifier::REVERSED);
            }

            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::raw(marker),
                Span::raw(label),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Contents"));
    f.render_widget(list, area);
}

fn draw_document(f: &mut Frame, app: &AppState, area: Rect) {
    let page = &app.page;
    let title = app
        .sidebar
        .active_chapter()
        .and_then(|index| app.sidebar.chapters().get(index))
        .map_or_else(|| page.path.display().to_string(), |c| c.title.clone());

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = page
        .lines
        .iter()
        .skip(page.scroll_row)
        .take(usize::from(inner.height))
        .map(|text| {
            if text.starts_with('#') {
                Line::styled(
                    text.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else {
                Line::raw(text.clone())
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);

    if let Some(snapshot) = app.sidebar.navigator().and_then(|n| n.debug_snapshot()) {
        draw_threshold_debug(f, inner, page.row_height, &snapshot);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_threshold_debug(
    f: &mut Frame,
    area: Rect,
    row_height: f64,
    snapshot: &crate::threshold::ThresholdSnapshot,
) {
    let row = (snapshot.threshold / row_height.max(1.0)).floor();
    if row >= 0.0 && row < f64::from(area.height) {
        let line_area = Rect {
            y: area.y + row as u16,
            height: 1,
            ..area
        };
        let marker = Paragraph::new("─".repeat(usize::from(area.width)))
            .style(Style::default().fg(Color::Red));
        f.render_widget(marker, line_area);
    }

    let rows: Vec<Row> = snapshot
        .rows()
        .into_iter()
        .map(|(label, value)| Row::new(vec![Cell::from(label), Cell::from(value)]))
        .collect();
    let height = (rows.len() as u16 + 2).min(area.height);
    let width = 34.min(area.width);
    let table_area = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    };
    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(0)])
        .block(Block::default().borders(Borders::ALL).title("threshold"));
    f.render_widget(Clear, table_area);
    f.render_widget(table, table_area);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help = app.message.clone().unwrap_or_else(|| match app.focus {
        Focus::Document => {
            "↑/↓: Scroll | PgUp/PgDn: Page | g/G: Top/Bottom | Tab: Sidebar | d: Debug | q: Quit"
                .to_string()
        }
        Focus::Sidebar => {
            "↑/↓: Select | Enter: Go | Space/←/→: Fold | Tab: Document | d: Debug | q: Quit"
                .to_string()
        }
    });
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, area);
}
