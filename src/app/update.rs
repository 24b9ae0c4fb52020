use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Position;
use tracing::{debug, info};

use crate::api::{DEFAULT_ENDPOINT, HttpUserSource};
use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppEvent, AppState, InputMode};
use crate::config::Config;
use crate::loader::Loader;
use crate::search::SortKey;
use crate::ui::{self, FrameLayout};

/// What the loop should do with a key press or click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Apply(AppEvent),
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: &Config,
    keymap: &Keymap,
) -> Result<()> {
    let mut app = AppState::new(config.dark);
    let mut loader = Loader::new();
    loader.start(HttpUserSource::new(DEFAULT_ENDPOINT));
    let mut layout = FrameLayout::default();

    loop {
        if let Some(outcome) = loader.poll() {
            app = app.apply(AppEvent::LoadSettled(outcome));
        }

        terminal
            .draw(|f| {
                layout = ui::render(f, &app, keymap);
            })
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(100)).context("poll terminal events")? {
            continue;
        }
        let command = match event::read().context("read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                translate_key(&app, keymap, key, layout.columns)
            }
            Event::Mouse(mouse) => translate_mouse(&app, &layout, mouse),
            _ => None,
        };
        match command {
            Some(Command::Quit) => {
                info!("quit requested");
                break;
            }
            Some(Command::Apply(ev)) => {
                debug!(event = ?ev, "applying event");
                app = app.apply(ev);
            }
            None => {}
        }
    }
    Ok(())
}

/// Map a mouse event to a command using the regions from the last draw.
///
/// Only left-button presses count. An open overlay is modal: a press outside
/// it (or on its close button) dismisses it and nothing behind it is hit.
pub fn translate_mouse(app: &AppState, layout: &FrameLayout, mouse: MouseEvent) -> Option<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let at = Position::new(mouse.column, mouse.row);

    if app.show_help {
        return match layout.help {
            Some(help) if help.contains(at) => None,
            _ => Some(Command::Apply(AppEvent::ToggleHelp)),
        };
    }

    if app.selected_user.is_some() {
        return match layout.detail {
            Some(detail) if detail.close.contains(at) => Some(Command::Apply(AppEvent::Dismiss)),
            Some(detail) if detail.modal.contains(at) => None,
            _ => Some(Command::Apply(AppEvent::Dismiss)),
        };
    }

    layout
        .card_at(at)
        .map(|id| Command::Apply(AppEvent::Select(id)))
}

/// Map a key press to a command given the current state.
///
/// `columns` is the number of cards per grid row from the last draw; vertical
/// movement jumps by that many cards.
pub fn translate_key(
    app: &AppState,
    keymap: &Keymap,
    key: KeyEvent,
    columns: usize,
) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    if app.input_mode == InputMode::Search {
        let ev = match key.code {
            KeyCode::Enter => AppEvent::FinishSearch,
            KeyCode::Esc => AppEvent::CancelSearch,
            KeyCode::Backspace => AppEvent::SearchBackspace,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                AppEvent::SearchInput(c)
            }
            _ => return None,
        };
        return Some(Command::Apply(ev));
    }

    let action = keymap.resolve(&key)?;

    if app.show_help {
        return match action {
            KeyAction::Quit => Some(Command::Quit),
            KeyAction::OpenHelp | KeyAction::CloseDetails | KeyAction::OpenDetails => {
                Some(Command::Apply(AppEvent::ToggleHelp))
            }
            _ => None,
        };
    }

    if app.selected_user.is_some() {
        return match action {
            KeyAction::Quit => Some(Command::Quit),
            KeyAction::CloseDetails | KeyAction::OpenDetails => {
                Some(Command::Apply(AppEvent::Dismiss))
            }
            KeyAction::ToggleTheme => Some(Command::Apply(AppEvent::ToggleTheme)),
            _ => None,
        };
    }

    let step = columns.max(1) as isize;
    let ev = match action {
        KeyAction::Quit => return Some(Command::Quit),
        KeyAction::ToggleTheme => AppEvent::ToggleTheme,
        KeyAction::OpenHelp => AppEvent::ToggleHelp,
        KeyAction::Ignore => return None,
        // Controls and cards only exist once the directory is loaded.
        _ if !app.is_ready() => return None,
        KeyAction::StartSearch => AppEvent::StartSearch,
        KeyAction::CycleSort => AppEvent::CycleSort,
        KeyAction::SortByName => AppEvent::SetSort(SortKey::Name),
        KeyAction::SortByEmail => AppEvent::SetSort(SortKey::Email),
        KeyAction::SortByPhone => AppEvent::SetSort(SortKey::Phone),
        KeyAction::MoveUp => AppEvent::MoveCursor(-step),
        KeyAction::MoveDown => AppEvent::MoveCursor(step),
        KeyAction::MoveLeft => AppEvent::MoveCursor(-1),
        KeyAction::MoveRight => AppEvent::MoveCursor(1),
        KeyAction::OpenDetails => AppEvent::OpenFocused,
        KeyAction::CloseDetails => return None,
    };
    Some(Command::Apply(ev))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadFailure;
    use crate::model::User;
    use crate::ui::components::DetailArea;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready() -> AppState {
        let users = vec![
            User {
                id: 1,
                name: "Leanne Graham".into(),
                ..Default::default()
            },
            User {
                id: 2,
                name: "Ervin Howell".into(),
                ..Default::default()
            },
        ];
        AppState::default().apply(AppEvent::LoadSettled(Ok(users)))
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Two cards side by side, with Ervin (id 2) first as in name order.
    fn two_cards() -> FrameLayout {
        FrameLayout {
            columns: 2,
            cards: vec![(Rect::new(0, 6, 38, 7), 2), (Rect::new(38, 6, 38, 7), 1)],
            ..FrameLayout::default()
        }
    }

    fn with_detail(mut layout: FrameLayout) -> FrameLayout {
        layout.detail = Some(DetailArea {
            modal: Rect::new(10, 5, 60, 12),
            close: Rect::new(59, 16, 9, 1),
        });
        layout
    }

    #[test]
    fn ctrl_c_always_quits() {
        let km = Keymap::default();
        let mut app = ready().apply(AppEvent::StartSearch);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(&app, &km, ctrl_c, 3), Some(Command::Quit));
        app = app.apply(AppEvent::FinishSearch).apply(AppEvent::Select(1));
        assert_eq!(translate_key(&app, &km, ctrl_c, 3), Some(Command::Quit));
    }

    #[test]
    fn search_mode_captures_letters() {
        let km = Keymap::default();
        let app = ready().apply(AppEvent::StartSearch);
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Char('q')), 3),
            Some(Command::Apply(AppEvent::SearchInput('q')))
        );
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Esc), 3),
            Some(Command::Apply(AppEvent::CancelSearch))
        );
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Enter), 3),
            Some(Command::Apply(AppEvent::FinishSearch))
        );
    }

    #[test]
    fn controls_are_inert_while_loading_or_failed() {
        let km = Keymap::default();
        let failed = AppState::default()
            .apply(AppEvent::LoadSettled(Err(LoadFailure::Status(500))));
        for app in [AppState::default(), failed] {
            assert_eq!(translate_key(&app, &km, press(KeyCode::Char('/')), 3), None);
            assert_eq!(translate_key(&app, &km, press(KeyCode::Char('s')), 3), None);
            assert_eq!(translate_key(&app, &km, press(KeyCode::Enter), 3), None);
            assert_eq!(
                translate_key(&app, &km, press(KeyCode::Char('t')), 3),
                Some(Command::Apply(AppEvent::ToggleTheme))
            );
            assert_eq!(
                translate_key(&app, &km, press(KeyCode::Char('q')), 3),
                Some(Command::Quit)
            );
        }
    }

    #[test]
    fn vertical_moves_step_by_columns() {
        let km = Keymap::default();
        let app = ready();
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Down), 3),
            Some(Command::Apply(AppEvent::MoveCursor(3)))
        );
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Char('k')), 0),
            Some(Command::Apply(AppEvent::MoveCursor(-1)))
        );
    }

    #[test]
    fn overlay_swallows_navigation_and_closes_on_esc() {
        let km = Keymap::default();
        let app = ready().apply(AppEvent::Select(2));
        assert_eq!(translate_key(&app, &km, press(KeyCode::Down), 3), None);
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Esc), 3),
            Some(Command::Apply(AppEvent::Dismiss))
        );
    }

    #[test]
    fn help_closes_with_question_mark() {
        let km = Keymap::default();
        let app = ready().apply(AppEvent::ToggleHelp);
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Char('?')), 3),
            Some(Command::Apply(AppEvent::ToggleHelp))
        );
        assert_eq!(translate_key(&app, &km, press(KeyCode::Char('s')), 3), None);
    }

    #[test]
    fn sort_shortcuts_pick_keys() {
        let km = Keymap::default();
        let app = ready();
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Char('2')), 3),
            Some(Command::Apply(AppEvent::SetSort(SortKey::Email)))
        );
        assert_eq!(
            translate_key(&app, &km, press(KeyCode::Char('s')), 3),
            Some(Command::Apply(AppEvent::CycleSort))
        );
    }

    #[test]
    fn click_on_card_selects_its_user() {
        let app = ready();
        let layout = two_cards();
        assert_eq!(
            translate_mouse(&app, &layout, click(1, 6)),
            Some(Command::Apply(AppEvent::Select(2)))
        );
        assert_eq!(
            translate_mouse(&app, &layout, click(75, 12)),
            Some(Command::Apply(AppEvent::Select(1)))
        );
    }

    #[test]
    fn click_between_cards_does_nothing() {
        let app = ready();
        let layout = two_cards();
        assert_eq!(translate_mouse(&app, &layout, click(5, 2)), None);
        assert_eq!(translate_mouse(&app, &layout, click(76, 8)), None);
        assert_eq!(translate_mouse(&app, &layout, click(5, 13)), None);
    }

    #[test]
    fn only_left_press_counts() {
        let app = ready();
        let layout = two_cards();
        let mut ev = click(1, 6);
        ev.kind = MouseEventKind::Down(MouseButton::Right);
        assert_eq!(translate_mouse(&app, &layout, ev), None);
        ev.kind = MouseEventKind::Up(MouseButton::Left);
        assert_eq!(translate_mouse(&app, &layout, ev), None);
        ev.kind = MouseEventKind::ScrollDown;
        assert_eq!(translate_mouse(&app, &layout, ev), None);
    }

    #[test]
    fn click_outside_overlay_dismisses() {
        let app = ready().apply(AppEvent::Select(2));
        let layout = with_detail(two_cards());
        // (1, 6) is a card, but the overlay is modal
        assert_eq!(
            translate_mouse(&app, &layout, click(1, 6)),
            Some(Command::Apply(AppEvent::Dismiss))
        );
        assert_eq!(
            translate_mouse(&app, &layout, click(79, 0)),
            Some(Command::Apply(AppEvent::Dismiss))
        );
    }

    #[test]
    fn click_inside_overlay_keeps_it_open_unless_on_close() {
        let app = ready().apply(AppEvent::Select(2));
        let layout = with_detail(two_cards());
        assert_eq!(translate_mouse(&app, &layout, click(20, 8)), None);
        assert_eq!(
            translate_mouse(&app, &layout, click(60, 16)),
            Some(Command::Apply(AppEvent::Dismiss))
        );
    }

    #[test]
    fn click_outside_help_closes_it() {
        let app = ready().apply(AppEvent::ToggleHelp);
        let mut layout = two_cards();
        layout.help = Some(Rect::new(10, 2, 60, 20));
        assert_eq!(translate_mouse(&app, &layout, click(30, 10)), None);
        assert_eq!(
            translate_mouse(&app, &layout, click(1, 23)),
            Some(Command::Apply(AppEvent::ToggleHelp))
        );
    }

    #[test]
    fn no_cards_means_no_selection() {
        let app = AppState::default();
        let layout = FrameLayout {
            columns: 2,
            ..FrameLayout::default()
        };
        assert_eq!(translate_mouse(&app, &layout, click(1, 6)), None);
    }
}
