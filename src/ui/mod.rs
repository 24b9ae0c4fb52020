//! Rendering of the whole screen from an [`AppState`].
pub mod cards;
pub mod components;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::keymap::Keymap;
use crate::app::{AppState, InputMode, Presentation};
use crate::search::SortKey;
use theme::Theme;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Where things landed in the last frame. The event loop uses it for
/// vertical movement and to hit-test mouse clicks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameLayout {
    /// Cards per grid row.
    pub columns: usize,
    /// Every card drawn, with the id of its user.
    pub cards: Vec<(Rect, u32)>,
    pub detail: Option<components::DetailArea>,
    pub help: Option<Rect>,
}

impl FrameLayout {
    /// Id of the user whose card covers the given cell.
    pub fn card_at(&self, at: Position) -> Option<u32> {
        self.cards
            .iter()
            .find(|(rect, _)| rect.contains(at))
            .map(|(_, id)| *id)
    }
}

/// Draw one frame and report where the clickable parts ended up.
pub fn render(f: &mut Frame, app: &AppState, keymap: &Keymap) -> FrameLayout {
    let theme = Theme::for_mode(app.dark_mode);
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let controls_height = if app.is_ready() { 3 } else { 0 };
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(controls_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, root[0], app, &theme);
    if app.is_ready() {
        render_controls(f, root[1], app, &theme);
    }

    let body = root[2];
    let mut layout = FrameLayout {
        columns: cards::columns_for(body.width),
        ..FrameLayout::default()
    };
    match app.presentation() {
        Presentation::Loading => {
            let frame = (app.started_at.elapsed().as_millis() / 100) as usize % SPINNER.len();
            let msg = format!("{} Loading users...", SPINNER[frame]);
            components::render_message(f, body, &msg, Style::default().fg(theme.muted));
        }
        Presentation::Error(msg) => {
            components::render_message(f, body, msg, Style::default().fg(theme.error));
        }
        Presentation::Empty => {
            components::render_message(
                f,
                body,
                "No users found. Try a different name.",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            );
        }
        Presentation::Cards(view) => {
            layout.cards = cards::render_card_grid(f, body, app, &view, &theme);
        }
    }

    components::render_status_bar(f, root[3], app, &theme);

    if let Some(user) = &app.selected_user {
        layout.detail = Some(components::render_detail_modal(f, area, user, &theme));
    }
    if app.show_help {
        layout.help = Some(components::render_help_modal(f, area, keymap, &theme));
    }
    layout
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().fg(theme.header_fg).bg(theme.header_bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);
    let title = Paragraph::new(Span::styled(
        "User Directory",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, halves[0]);

    let mode = if app.dark_mode { "Dark" } else { "Light" };
    let toggle = if app.dark_mode { "[●]" } else { "[ ]" };
    let right = Paragraph::new(format!("{mode} Mode {toggle}")).alignment(Alignment::Right);
    f.render_widget(right, halves[1]);
}

fn render_controls(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let searching = app.input_mode == InputMode::Search;
    let search_border = if searching {
        theme.highlight_fg
    } else {
        theme.border
    };
    let mut search_line = vec![Span::raw(app.search.clone())];
    if searching {
        search_line.push(Span::styled("▏", Style::default().fg(theme.highlight_fg)));
    } else if app.search.is_empty() {
        search_line.push(Span::styled("press / to search", Style::default().fg(theme.muted)));
    }
    let search = Paragraph::new(Line::from(search_line)).block(
        Block::default()
            .title("Search by name")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(search_border)),
    );
    f.render_widget(search, parts[0]);

    let mut spans = Vec::new();
    for (i, key) in SortKey::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let style = if key == app.sort {
            Style::default().fg(theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(key.label(), style));
    }
    let sort = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Sort By")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(sort, parts[1]);
}
