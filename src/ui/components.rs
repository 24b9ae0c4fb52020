//! Shared UI components (status bar, overlays, centered messages).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode};
use crate::model::User;
use crate::ui::theme::Theme;

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// A single wrapped message, vertically centered in `area`.
pub fn render_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
    let top = area.height.saturating_sub(1) / 2;
    let rect = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: area.height.saturating_sub(top),
    };
    let p = Paragraph::new(message.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, rect);
}

/// Render the bottom status bar with mode, counts and the sort key.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
    };
    let state = if app.is_loading() {
        "loading".to_string()
    } else if app.error().is_some() {
        "error".to_string()
    } else {
        format!("users:{}/{}", app.view().len(), app.users().len())
    };
    let msg = format!(
        "mode: {mode}  {state}  sort:{}  ?: help  q: quit",
        app.sort.label()
    );
    let p = Paragraph::new(msg).style(Style::default().fg(theme.status_fg).bg(theme.status_bg));
    f.render_widget(p, area);
}

const CLOSE_BUTTON: &str = "[ close ]";

/// Screen area of the detail overlay and of its close button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailArea {
    pub modal: Rect,
    pub close: Rect,
}

/// Render the detail overlay for the selected user.
pub fn render_detail_modal(f: &mut Frame, area: Rect, user: &User, theme: &Theme) -> DetailArea {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        field("Email:   ", &user.email, label),
        field("Phone:   ", &user.phone, label),
        field("Company: ", &user.company.name, label),
        field("City:    ", &user.address.city, label),
    ];
    if let Some(username) = user.username.as_deref().filter(|s| !s.is_empty()) {
        lines.push(field("Username: ", username, label));
    }
    if let Some(website) = user.website.as_deref().filter(|s| !s.is_empty()) {
        lines.push(field("Website: ", website, label));
    }
    lines.push(field("Avatar:  ", &user.avatar_url(), label));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Esc: close", Style::default().fg(theme.muted))));

    let width = 64u16.min(area.width.saturating_sub(4)).max(30);
    let height = lines.len() as u16 + 2;
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines)
        .style(Style::default().fg(theme.text).bg(theme.background))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(
                    user.name.clone(),
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);

    // Sits on the bottom border, right-aligned inside the corner.
    let close_width = (CLOSE_BUTTON.chars().count() as u16).min(rect.width);
    let close = Rect {
        x: rect.right().saturating_sub(close_width + 2).max(rect.x),
        y: rect.bottom().saturating_sub(1),
        width: close_width,
        height: rect.height.min(1),
    };
    let button = Paragraph::new(CLOSE_BUTTON).style(
        Style::default()
            .fg(theme.highlight_fg)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(button, close);
    DetailArea { modal: rect, close }
}

fn field(name: &'static str, value: &str, style: Style) -> Line<'static> {
    Line::from(vec![Span::styled(name, style), Span::raw(value.to_string())])
}

/// Render the key reference built from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, keymap: &Keymap, theme: &Theme) -> Rect {
    let rows: [(&str, KeyAction); 12] = [
        ("Search", KeyAction::StartSearch),
        ("Next sort key", KeyAction::CycleSort),
        ("Sort by name", KeyAction::SortByName),
        ("Sort by email", KeyAction::SortByEmail),
        ("Sort by phone", KeyAction::SortByPhone),
        ("Toggle theme", KeyAction::ToggleTheme),
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Open details", KeyAction::OpenDetails),
        ("Close", KeyAction::CloseDetails),
        ("Help", KeyAction::OpenHelp),
        ("Quit", KeyAction::Quit),
    ];
    let label_w = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (label, action) in rows {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(keymap.keys_for(action), Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "In search: type to filter, Enter keeps, Esc clears",
        Style::default().fg(theme.muted),
    )));

    let width = 60u16.min(area.width.saturating_sub(4)).max(30);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines)
        .style(Style::default().fg(theme.text).bg(theme.background))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
    rect
}
