use super::*;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

#[test]
fn ctrl_chords_are_lower_cased() {
    assert_eq!(
        into_key(press(KeyCode::Char('K'), KeyModifiers::CONTROL)),
        Some(Key::Ctrl('k'))
    );
    assert_eq!(
        into_key(press(KeyCode::Char('s'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
        Some(Key::Ctrl('s'))
    );
}

#[test]
fn shifted_chars_stay_printable() {
    assert_eq!(
        into_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
        Some(Key::Char('A'))
    );
}

#[test]
fn ctrl_space_normalizes_from_null() {
    assert_eq!(
        into_key(press(KeyCode::Null, KeyModifiers::NONE)),
        Some(Key::Ctrl(' '))
    );
}

#[test]
fn releases_and_non_key_events_are_dropped() {
    let release = Event::Key(KeyEvent {
        code: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    });
    assert_eq!(into_key(release), None);
    assert_eq!(into_key(Event::Resize(80, 24)), None);
    assert_eq!(into_key(Event::FocusLost), None);
    assert_eq!(into_key(press(KeyCode::F(5), KeyModifiers::NONE)), None);
}
