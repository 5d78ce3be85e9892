mod post_detail;
mod post_list;
pub mod theme;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::view::{DetailScreen, ListScreen, Screen};

use theme::Palette;

pub fn render(frame: &mut Frame, app: &App) {
    let state = app.store.state();
    let palette = theme::palette(state.dark_mode);
    let screen = app.screen();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, &palette, state.dark_mode, chunks[0]);

    match &screen {
        Screen::List(list) => post_list::render(frame, list, app.cursor, &palette, chunks[1]),
        Screen::Detail(detail) => post_detail::render(frame, detail, &palette, chunks[1]),
    }

    render_status_bar(frame, &screen, &palette, chunks[2]);
}

fn render_header(frame: &mut Frame, palette: &Palette, dark_mode: bool, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    let bar = Style::default().bg(palette.accent).fg(palette.surface);

    let title = Paragraph::new(Line::from(Span::styled(
        " Blog Explorer",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .style(bar);
    frame.render_widget(title, chunks[0]);

    let mode = if dark_mode { "theme: dark " } else { "theme: light " };
    let toggle = Paragraph::new(mode)
        .alignment(Alignment::Right)
        .style(bar);
    frame.render_widget(toggle, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, screen: &Screen, palette: &Palette, area: Rect) {
    let status = match screen {
        Screen::List(ListScreen::Loading) | Screen::Detail(DetailScreen::Loading { .. }) => {
            Line::from(Span::styled(
                "Loading...",
                Style::default().fg(palette.loading),
            ))
        }
        Screen::List(ListScreen::Failed(_)) => Line::from(Span::styled(
            "r: reload | t: theme | q: quit",
            palette.secondary(),
        )),
        Screen::List(ListScreen::Ready { .. }) => Line::from(Span::styled(
            "j/k: nav | h/l: page | g/G: first/last | Enter: open | t: theme | r: reload | q: quit",
            palette.secondary(),
        )),
        Screen::Detail(_) => Line::from(Span::styled(
            "Enter/q: back to list | t: theme | r: reload",
            palette.secondary(),
        )),
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(palette.surface));
    frame.render_widget(status_bar, area);
}

/// Upper-case the first letter of every word
pub(crate) fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
