//! Rendering helpers shared by the screens

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::browse::{BrowsingModel, Status};
use super::theme::Theme;
use crate::templates::Template;

/// Inner width for a terminal `width` columns wide
pub fn content_width(width: u16) -> u16 {
    width.saturating_sub(4).clamp(40, 80)
}

/// Visible list rows given the terminal height and lines used by chrome
pub fn list_height(height: u16, chrome: u16, max: u16) -> usize {
    usize::from(height.saturating_sub(chrome).clamp(5, max))
}

/// Center a `width` x `height` box inside `area`, shrinking to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw `lines` inside a rounded, titled box centered in the frame
pub fn render_panel(frame: &mut Frame, theme: &Theme, title: &str, lines: Vec<Line<'static>>) {
    let area = frame.area();
    let width = content_width(area.width) + 4;
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let panel = centered(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", title), theme.title));

    frame.render_widget(Clear, panel);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
}

/// Search prompt in its three states: focused, holding a query, idle
pub fn search_line(theme: &Theme, query: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::styled("/ ", theme.selected),
            Span::styled(format!("{}▏", query), theme.search),
        ])
    } else if !query.is_empty() {
        Line::from(vec![
            Span::styled("/ ", theme.subtle),
            Span::styled(query.to_string(), theme.search),
        ])
    } else {
        Line::from(Span::styled("/ Press / to search", theme.subtle))
    }
}

pub fn status_line(theme: &Theme, status: Option<&Status>, width: u16) -> Line<'static> {
    match status {
        Some(s) if s.is_error => Line::from(Span::styled(truncate(&s.text, width), theme.error)),
        Some(s) => Line::from(Span::styled(truncate(&s.text, width), theme.success)),
        None => Line::default(),
    }
}

pub fn footer_line(theme: &Theme, text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme.footer))
}

/// `Selected: a, b` summary, always present so the layout doesn't jump
pub fn selected_summary(theme: &Theme, selected: &[Template], width: u16) -> Line<'static> {
    if selected.is_empty() {
        return Line::from(Span::styled("Selected: None", theme.subtle));
    }
    let names: Vec<String> = selected.iter().map(Template::display_name).collect();
    Line::from(Span::styled(
        truncate(&format!("Selected: {}", names.join(", ")), width),
        theme.subtle,
    ))
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Visible rows of a browsing model, padded to the viewport height
pub fn browse_rows(theme: &Theme, model: &BrowsingModel) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = model
        .visible_rows()
        .into_iter()
        .map(|row| {
            let cursor = if row.under_cursor { ">" } else { " " };
            let mark = if row.selected { "✓" } else { " " };
            let hint = if row.suggested { "*" } else { " " };
            let base = if row.under_cursor {
                theme.selected
            } else if row.suggested {
                theme.suggested
            } else {
                ratatui::style::Style::default()
            };

            let mut spans = vec![Span::styled(format!("{} [{}{}] ", cursor, mark, hint), base)];
            if row.is_user {
                spans.push(Span::styled("(User) ", theme.user_badge));
            }
            let label_style = if row.is_preset && !row.under_cursor {
                theme.preset_badge
            } else {
                base
            };
            spans.push(Span::styled(row.label, label_style));
            if !row.is_preset {
                spans.push(Span::styled(format!("  {}", row.category), theme.subtle));
            }
            Line::from(spans)
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("(no matches)", theme.footer)));
    }
    while lines.len() < model.list_height() {
        lines.push(Line::default());
    }
    lines
}

/// Footer hint for a browsing model in its current mode
pub fn browse_footer(model: &BrowsingModel) -> String {
    if model.is_focused() {
        "Type to filter • ↑↓ navigate • Enter toggle • Esc done".to_string()
    } else if !model.query().is_empty() {
        "Enter/Space toggle • Tab confirm • / edit search • Esc clear".to_string()
    } else if model.has_presets() {
        let presets = if model.presets_only() { "P all" } else { "P presets" };
        format!("Enter/Space toggle • Tab confirm • / search • {} • Esc cancel", presets)
    } else {
        "Enter/Space toggle • Tab confirm • / search • Esc cancel".to_string()
    }
}

/// Full browsing layout: summary, search, list, status, footer
pub fn render_browser(frame: &mut Frame, theme: &Theme, title: &str, model: &BrowsingModel) {
    let width = content_width(frame.area().width);
    let mut lines = vec![
        selected_summary(theme, model.selection().ordered(), width),
        Line::default(),
        search_line(theme, model.query(), model.is_focused()),
        Line::default(),
    ];
    lines.extend(browse_rows(theme, model));
    lines.push(Line::default());
    lines.push(status_line(theme, model.status(), width));
    lines.push(footer_line(theme, &browse_footer(model)));
    render_panel(frame, theme, title, lines);
}

/// Flatten a rendered buffer into text, one line per row; used by tests
#[cfg(test)]
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
