//! crossterm 事件 -> 编辑器按键
//!
//! Only key presses matter to the host; mouse, focus and resize events are dropped here so
//! `App` can be driven from tests without a terminal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Control chord, always lower-case.
    Ctrl(char),
    Enter,
    Tab,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

pub fn into_key(event: crossterm::event::Event) -> Option<Key> {
    match event {
        crossterm::event::Event::Key(key) => into_key_press(key),
        _ => None,
    }
}

pub fn into_key_press(event: crossterm::event::KeyEvent) -> Option<Key> {
    if event.kind == crossterm::event::KeyEventKind::Release {
        return None;
    }

    let ctrl = event
        .modifiers
        .contains(crossterm::event::KeyModifiers::CONTROL);

    let key = match event.code {
        crossterm::event::KeyCode::Char(ch) if ctrl => Key::Ctrl(ch.to_ascii_lowercase()),
        crossterm::event::KeyCode::Char(ch) => Key::Char(ch),
        // 部分终端把 Ctrl+Space 报成 NUL
        crossterm::event::KeyCode::Null => Key::Ctrl(' '),
        crossterm::event::KeyCode::Enter => Key::Enter,
        crossterm::event::KeyCode::Tab => Key::Tab,
        crossterm::event::KeyCode::Esc => Key::Esc,
        crossterm::event::KeyCode::Backspace => Key::Backspace,
        crossterm::event::KeyCode::Up => Key::Up,
        crossterm::event::KeyCode::Down => Key::Down,
        crossterm::event::KeyCode::Left => Key::Left,
        crossterm::event::KeyCode::Right => Key::Right,
        crossterm::event::KeyCode::Home => Key::Home,
        crossterm::event::KeyCode::End => Key::End,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
