//! Terminal rendering with `ratatui`.
//!
//! Each mounted pane gets a vertical slot in mount order. Modals are drawn
//! over the list area with `Clear` underneath.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::render::{ListPane, Pane};
use crate::session::Session;
use crate::theme::Palette;

/// Overlay shown on top of the panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quality menu with the row under its cursor.
    Quality { cursor: usize },
    Help,
}

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "down/up"),
    ("gg/G", "top/bottom"),
    ("enter", "play selected"),
    ("/", "search"),
    ("v", "quality"),
    ("t", "theme"),
    ("?", "help"),
    ("q", "quit"),
];

const SEARCH_CONTROLS: &[(&str, &str)] = &[
    ("type", "filter"),
    ("enter", "play selected"),
    ("esc", "clear search"),
];

fn controls_text(bindings: &[(&str, &str)]) -> String {
    bindings
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

fn block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title(title)
        .style(Style::default().fg(palette.fg).bg(palette.bg))
}

fn pane_height(pane: &Pane) -> Constraint {
    match pane {
        Pane::Header | Pane::Label(_) | Pane::Search => Constraint::Length(3),
        Pane::List(_) => Constraint::Min(1),
        Pane::Controls => Constraint::Length(4),
    }
}

/// Rows `[start, end)` to draw so the cursor stays centered when possible,
/// and the cursor's offset inside that window.
fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, cursor);
    }
    let half = height / 2;
    let mut start = cursor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, cursor - start)
}

fn quality_label(height: u32) -> String {
    format!("{height}p")
}

/// Render the whole UI for `session`, plus `modal` when one is open.
pub fn draw(frame: &mut Frame, session: &Session, modal: Option<Modal>, ui: &UiSettings) {
    let palette = session.theme().palette();
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

    let panes: Vec<(&str, &Pane)> = session.mounts().panes().collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(panes.iter().map(|(_, p)| pane_height(p)))
        .split(area);

    let mut list_area = area;
    for ((_, pane), chunk) in panes.iter().zip(chunks.iter().copied()) {
        match pane {
            Pane::Header => draw_header(frame, chunk, session, ui, &palette),
            Pane::Label(text) => draw_label(frame, chunk, text.as_deref(), session, &palette),
            Pane::Search => draw_search(frame, chunk, session, &palette),
            Pane::List(list) => {
                list_area = chunk;
                draw_list(frame, chunk, list, &palette);
            }
            Pane::Controls => draw_controls(frame, chunk, session, &palette),
        }
    }

    match modal {
        Some(Modal::Quality { cursor }) => draw_quality(frame, list_area, session, cursor, &palette),
        Some(Modal::Help) => draw_help(frame, list_area, &palette),
        None => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, session: &Session, ui: &UiSettings, palette: &Palette) {
    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.accent))
        .block(
            block(" chanplay ", palette)
                .title_alignment(Alignment::Center)
                .title_bottom(Line::from(format!(" {} ", session.theme().as_str())).right_aligned()),
        );
    frame.render_widget(header, area);
}

fn draw_label(frame: &mut Frame, area: Rect, text: Option<&str>, session: &Session, palette: &Palette) {
    let mut spans = vec![Span::styled(
        text.unwrap_or("-").to_string(),
        Style::default().fg(palette.active).add_modifier(Modifier::BOLD),
    )];
    if let Some(height) = session.selected_quality() {
        spans.push(Span::styled(
            format!("  [{}]", quality_label(height)),
            Style::default().fg(palette.muted),
        ));
    }

    let label = Paragraph::new(Line::from(spans)).block(block(" now playing ", palette).padding(padded()));
    frame.render_widget(label, area);
}

fn draw_search(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let query = session.query();
    let line = if session.search_mode() {
        Line::from(vec![
            Span::styled("/", Style::default().fg(palette.accent)),
            Span::raw(query.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if query.trim().is_empty() {
        Line::from(Span::styled("press / to search", Style::default().fg(palette.muted)))
    } else {
        Line::from(format!("/{query}"))
    };

    let search = Paragraph::new(line).block(block(" search ", palette).padding(padded()));
    frame.render_widget(search, area);
}

fn draw_list(frame: &mut Frame, area: Rect, pane: &ListPane, palette: &Palette) {
    let title = " playlist ";

    if let Some(text) = pane.placeholder() {
        let placeholder = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(block(title, palette));
        frame.render_widget(placeholder, area);
        return;
    }

    // Only build items for the visible window.
    let items = pane.items();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, cursor) = visible_window(items.len(), height, pane.cursor());

    let rows: Vec<ListItem> = items[start..end]
        .iter()
        .map(|item| {
            let marker = if item.active { "▶ " } else { "  " };
            let mut style = Style::default().fg(palette.fg);
            if item.active {
                style = style.fg(palette.active).add_modifier(Modifier::BOLD);
            } else if !item.playable {
                style = style.fg(palette.muted);
            }

            let mut spans = vec![
                Span::styled(marker, style),
                Span::styled(item.title.clone(), style),
                Span::styled(format!("  {}", item.language), Style::default().fg(palette.muted)),
            ];
            if !item.playable {
                spans.push(Span::styled("  (no stream)", Style::default().fg(palette.muted)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(rows)
        .block(block(title, palette))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_controls(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let bindings = if session.search_mode() {
        SEARCH_CONTROLS
    } else {
        CONTROLS
    };
    let footer = Paragraph::new(controls_text(bindings))
        .style(Style::default().fg(palette.muted))
        .block(block(" controls ", palette).padding(padded()))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, area);
}

fn draw_quality(frame: &mut Frame, area: Rect, session: &Session, cursor: usize, palette: &Palette) {
    let Some(options) = session.quality_options() else {
        let popup = centered_rect_sized(40, 5, area);
        frame.render_widget(Clear, popup);
        let empty = Paragraph::new("No quality levels for this stream")
            .style(Style::default().fg(palette.muted))
            .block(block(" quality (esc closes) ", palette).padding(padded()))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, popup);
        return;
    };

    let current = session.selected_quality();
    let rows: Vec<ListItem> = options
        .options
        .iter()
        .map(|&h| {
            let mark = if Some(h) == current { "● " } else { "  " };
            let mut text = format!("{mark}{}", quality_label(h));
            if h == options.default {
                text.push_str(" (default)");
            }
            ListItem::new(text)
        })
        .collect();

    let popup = centered_rect_sized(32, options.options.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let list = List::new(rows)
        .block(block(" quality (esc closes) ", palette))
        .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(cursor.min(options.options.len().saturating_sub(1))));
    frame.render_stateful_widget(list, popup, &mut state);
}

fn draw_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines: Vec<Line> = CONTROLS
        .iter()
        .chain(SEARCH_CONTROLS.iter().skip(2))
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("{k:>6}  "), Style::default().fg(palette.accent)),
                Span::raw(*v),
            ])
        })
        .collect();

    let popup = centered_rect_sized(40, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let help = Paragraph::new(lines).block(block(" help (esc closes) ", palette).padding(padded()));
    frame.render_widget(help, popup);
}
