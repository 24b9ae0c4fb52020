use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::model::User;
use crate::ui::theme::Theme;

pub const CARD_WIDTH: u16 = 38;
/// Borders plus five lines of content.
pub const CARD_HEIGHT: u16 = 7;

/// Cards per grid row for a body of the given width. Always at least one.
pub fn columns_for(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// Lay the view out as a grid, scrolled so the focused card is visible.
/// Returns each drawn card's area with its user id.
pub fn render_card_grid(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    view: &[User],
    theme: &Theme,
) -> Vec<(Rect, u32)> {
    let columns = columns_for(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = app.cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);
    let card_width = area.width / columns as u16;
    let mut drawn = Vec::new();

    for (idx, user) in view
        .iter()
        .enumerate()
        .skip(first_row * columns)
        .take(visible_rows * columns)
    {
        let row = (idx / columns - first_row) as u16;
        let col = (idx % columns) as u16;
        let top = row * CARD_HEIGHT;
        let rect = Rect {
            x: area.x + col * card_width,
            y: area.y + top,
            width: card_width,
            height: CARD_HEIGHT.min(area.height.saturating_sub(top)),
        };
        if rect.height == 0 {
            continue;
        }
        render_card(f, rect, user, idx == app.cursor, theme);
        drawn.push((rect, user.id));
    }
    drawn
}

fn render_card(f: &mut Frame, area: Rect, user: &User, focused: bool, theme: &Theme) {
    let (border, body) = if focused {
        (
            Style::default().fg(theme.highlight_fg).add_modifier(Modifier::BOLD),
            Style::default().fg(theme.text).bg(theme.highlight_bg),
        )
    } else {
        (Style::default().fg(theme.border), Style::default().fg(theme.text))
    };
    let label = Style::default().fg(theme.muted);
    let lines = vec![
        Line::from(Span::styled(
            user.name.clone(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![Span::styled("Email:   ", label), Span::raw(user.email.clone())]),
        Line::from(vec![Span::styled("Phone:   ", label), Span::raw(user.phone.clone())]),
        Line::from(vec![Span::styled("Company: ", label), Span::raw(user.company.name.clone())]),
        Line::from(vec![Span::styled("City:    ", label), Span::raw(user.address.city.clone())]),
    ];
    let marker = if focused { "▶ " } else { "" };
    let p = Paragraph::new(lines).style(body).block(
        Block::default()
            .title(format!("{marker}#{}", user.id))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(p, area);
}
