use super::app::{App, MessageBox, Overlay};
use crate::models::{slice_to_cow, Selection};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const POPUP_MAX_WIDTH: u16 = 72;

fn selection_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

fn caret_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let [editor_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    app.scroll_to_cursor(editor_area.height as usize);
    let cursor = render_editor(app, frame, editor_area);
    render_status(app, frame, status_area);

    let mut cursor = match app.overlay() {
        Some(overlay) => render_overlay(overlay, frame, editor_area),
        None => cursor,
    };
    if let Some(message) = app.message() {
        render_message(message, frame, editor_area);
        cursor = None;
    }

    if let Some((x, y)) = cursor {
        frame.set_cursor_position((x, y));
    }
}

/// Returns the screen position of the primary cursor when it is visible.
fn render_editor(app: &App, frame: &mut Frame, area: Rect) -> Option<(u16, u16)> {
    let buffer = app.buffer();
    let gutter = buffer.len_lines().to_string().len();
    let (cursor_row, cursor_col) = buffer.cursor();
    let selections = buffer.selections();

    let mut lines = Vec::with_capacity(area.height as usize);
    let mut cursor_pos = None;

    for row in (app.scroll()..buffer.len_lines()).take(area.height as usize) {
        let text = buffer
            .line_slice(row)
            .map(slice_to_cow)
            .unwrap_or_default();
        let text = text.trim_end_matches(['\n', '\r']);

        let mut spans = vec![Span::styled(
            format!("{:>gutter$} ", row + 1),
            Style::default().fg(Color::DarkGray),
        )];
        let mut width = 0usize;
        let mut graphemes = 0usize;
        for (col, g) in text.graphemes(true).enumerate() {
            if row == cursor_row && col == cursor_col {
                cursor_pos = Some(width);
            }
            spans.push(Span::styled(g.to_string(), cell_style(selections, (row, col))));
            width += g.width();
            graphemes = col + 1;
        }
        if row == cursor_row && cursor_col >= graphemes {
            cursor_pos = Some(width);
        }
        if is_secondary_caret(selections, (row, graphemes), (cursor_row, cursor_col)) {
            spans.push(Span::styled(" ", caret_style()));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);

    let screen_row = cursor_row.checked_sub(app.scroll())?;
    let x = area.x as usize + gutter + 1 + cursor_pos?;
    let max_x = area.right().saturating_sub(1) as usize;
    Some((x.min(max_x) as u16, area.y + screen_row as u16))
}

fn cell_style(selections: &[Selection], pos: (usize, usize)) -> Style {
    for selection in selections {
        if selection.contains(pos) {
            return selection_style();
        }
        if selection.is_empty() && selection.cursor() == pos {
            return caret_style();
        }
    }
    Style::default()
}

fn is_secondary_caret(selections: &[Selection], pos: (usize, usize), primary: (usize, usize)) -> bool {
    pos != primary
        && selections
            .iter()
            .any(|s| s.is_empty() && s.cursor() == pos)
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let (row, col) = app.buffer().cursor();
    let name = app
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.path().display().to_string());
    let dirty = if app.is_dirty() { " [+]" } else { "" };

    let mut spans = vec![
        Span::styled(
            format!(" {name}{dirty} "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" Ln {}, Col {} ", row + 1, col + 1)),
    ];
    if !app.status().is_empty() {
        spans.push(Span::styled(
            format!(" {} ", app.status()),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        " ^K snippet  ^S save  ^Q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}

fn render_overlay(overlay: &Overlay, frame: &mut Frame, area: Rect) -> Option<(u16, u16)> {
    match overlay {
        Overlay::Query { value } => {
            let popup = centered(area, POPUP_MAX_WIDTH, 3);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(value.as_str()).block(Block::bordered().title(" Search snippets ")),
                popup,
            );
            let x = popup.x as usize + 1 + value.width();
            Some((
                x.min(popup.right().saturating_sub(2) as usize) as u16,
                popup.y + 1,
            ))
        }
        Overlay::Picker {
            title,
            labels,
            selected,
        } => {
            let height = (labels.len() as u16).saturating_add(2);
            let popup = centered(area, POPUP_MAX_WIDTH, height);
            let items: Vec<ListItem> = labels
                .iter()
                .map(|label| ListItem::new(label.lines().next().unwrap_or_default().to_string()))
                .collect();
            let list = List::new(items)
                .block(Block::bordered().title(format!(" {title} ")))
                .highlight_style(selection_style())
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(*selected));

            frame.render_widget(Clear, popup);
            frame.render_stateful_widget(list, popup, &mut state);
            None
        }
    }
}

fn render_message(message: &MessageBox, frame: &mut Frame, area: Rect) {
    let (title, color) = if message.is_error {
        (" Error ", Color::Red)
    } else {
        (" Snippets ", Color::Cyan)
    };
    let height = (message.text.lines().count() as u16).saturating_add(3);
    let popup = centered(area, POPUP_MAX_WIDTH, height);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(message.text.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(title)
                    .title_bottom(" Enter ")
                    .border_style(Style::default().fg(color)),
            ),
        popup,
    );
}

fn centered(area: Rect, max_width: u16, height: u16) -> Rect {
    let width = max_width.min(area.width.saturating_sub(4)).max(1);
    let height = height.min(area.height).max(1);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 3,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/render.rs"]
mod tests;
