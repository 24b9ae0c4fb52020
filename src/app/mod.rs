//! Application state types and the reducer.
//!
//! [`AppState`] is the whole session state. It only changes through
//! [`AppState::apply`], which takes the old state and one [`AppEvent`] and
//! returns the new state. The event loop lives in [`update`].
//!
pub mod keymap;
pub mod update;

use std::time::Instant;

use crate::error::LoadFailure;
use crate::model::User;
use crate::search::{self, SortKey};

/// Progress of the one-shot directory fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Error(String),
    Ready(Vec<User>),
}

/// What the body of the screen shows. Exactly one applies at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation<'a> {
    Loading,
    Error(&'a str),
    /// Loaded, but nothing matches the current search.
    Empty,
    Cards(Vec<User>),
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Everything that can change the session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    LoadSettled(Result<Vec<User>, LoadFailure>),
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SetSearch(String),
    FinishSearch,
    CancelSearch,
    SetSort(SortKey),
    CycleSort,
    ToggleTheme,
    MoveCursor(isize),
    OpenFocused,
    Select(u32),
    Dismiss,
    ToggleHelp,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub started_at: Instant,
    pub load: LoadStatus,
    pub search: String,
    pub sort: SortKey,
    pub selected_user: Option<User>,
    pub dark_mode: bool,
    pub input_mode: InputMode,
    /// Focused card within the derived view.
    pub cursor: usize,
    pub show_help: bool,
}

impl AppState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            started_at: Instant::now(),
            load: LoadStatus::Loading,
            search: String::new(),
            sort: SortKey::default(),
            selected_user: None,
            dark_mode,
            input_mode: InputMode::Normal,
            cursor: 0,
            show_help: false,
        }
    }

    /// Loaded users, empty until the fetch succeeds.
    pub fn users(&self) -> &[User] {
        match &self.load {
            LoadStatus::Ready(users) => users.as_slice(),
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadStatus::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.load, LoadStatus::Ready(_))
    }

    /// Filtered and sorted users for the current search and sort key.
    pub fn view(&self) -> Vec<User> {
        search::derive_view(self.users(), &self.search, self.sort)
    }

    pub fn presentation(&self) -> Presentation<'_> {
        match &self.load {
            LoadStatus::Loading => Presentation::Loading,
            LoadStatus::Error(msg) => Presentation::Error(msg.as_str()),
            LoadStatus::Ready(_) => {
                let view = self.view();
                if view.is_empty() {
                    Presentation::Empty
                } else {
                    Presentation::Cards(view)
                }
            }
        }
    }

    pub fn apply(mut self, event: AppEvent) -> Self {
        match event {
            AppEvent::LoadSettled(outcome) => {
                if !self.is_loading() {
                    return self;
                }
                self.load = match outcome {
                    Ok(users) => LoadStatus::Ready(users),
                    Err(failure) => LoadStatus::Error(failure.user_message().to_string()),
                };
                self.cursor = 0;
            }
            AppEvent::StartSearch => {
                self.input_mode = InputMode::Search;
            }
            AppEvent::SearchInput(c) => {
                self.search.push(c);
                self.cursor = 0;
            }
            AppEvent::SearchBackspace => {
                self.search.pop();
                self.cursor = 0;
            }
            AppEvent::SetSearch(s) => {
                self.search = s;
                self.cursor = 0;
            }
            AppEvent::FinishSearch => {
                self.input_mode = InputMode::Normal;
            }
            AppEvent::CancelSearch => {
                self.search.clear();
                self.cursor = 0;
                self.input_mode = InputMode::Normal;
            }
            AppEvent::SetSort(key) => {
                self.sort = key;
                self.clamp_cursor();
            }
            AppEvent::CycleSort => {
                self.sort = self.sort.next();
                self.clamp_cursor();
            }
            AppEvent::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
            }
            AppEvent::MoveCursor(delta) => {
                let len = self.view().len();
                if len == 0 {
                    self.cursor = 0;
                } else {
                    let target = self.cursor as isize + delta;
                    self.cursor = target.clamp(0, len as isize - 1) as usize;
                }
            }
            AppEvent::OpenFocused => {
                if let Some(user) = self.view().into_iter().nth(self.cursor) {
                    self.selected_user = Some(user);
                }
            }
            AppEvent::Select(id) => {
                if let Some(user) = self.users().iter().find(|u| u.id == id) {
                    self.selected_user = Some(user.clone());
                    // A click on a card leaves the search box.
                    self.input_mode = InputMode::Normal;
                }
            }
            AppEvent::Dismiss => {
                self.selected_user = None;
            }
            AppEvent::ToggleHelp => {
                self.show_help = !self.show_help;
            }
        }
        self
    }

    fn clamp_cursor(&mut self) {
        let len = self.view().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
