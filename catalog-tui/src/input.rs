//! Maps terminal events to screen actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::screen::{Action, CatalogScreen};
use crate::view::{HitMap, Target};

/// The action for `event`, if it means anything on this screen.
///
/// `hits` is the hit map from the last render.
pub fn action_for_event(event: &Event, hits: &HitMap, screen: &CatalogScreen) -> Option<Action> {
    match event {
        Event::Key(key) => action_for_key(key, screen),
        Event::Mouse(mouse) => action_for_mouse(mouse, hits, screen),
        _ => None,
    }
}

fn action_for_key(key: &KeyEvent, screen: &CatalogScreen) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let page = screen.viewport_rows();
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('a') => Action::ToggleSelectAll,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => Action::ToggleCursor,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::PageUp => Action::PageUp(page),
        KeyCode::PageDown => Action::PageDown(page),
        KeyCode::Home | KeyCode::Char('g') => Action::Home,
        KeyCode::End | KeyCode::Char('G') => Action::End,
        _ => return None,
    };
    Some(action)
}

fn action_for_mouse(mouse: &MouseEvent, hits: &HitMap, screen: &CatalogScreen) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hits.hit(mouse.column, mouse.row)? {
            Target::SelectAllButton => Some(Action::ToggleSelectAll),
            Target::ClearButton => Some(Action::Clear),
            // Rows only have a checkbox in selection mode.
            Target::Row(id) => screen.selection().is_engaged().then_some(Action::ToggleRow(id)),
        },
        MouseEventKind::ScrollUp => Some(Action::CursorUp),
        MouseEventKind::ScrollDown => Some(Action::CursorDown),
        _ => None,
    }
}
