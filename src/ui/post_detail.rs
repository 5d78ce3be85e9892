use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::types::BlogPost;
use crate::view::DetailScreen;

use super::capitalize_words;
use super::theme::Palette;

pub fn render(frame: &mut Frame, detail: &DetailScreen, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    // Every state keeps the way back visible.
    let back = Paragraph::new(Line::from(Span::styled(
        "← Back to Blog List [Enter]",
        palette.title(),
    )))
    .style(Style::default().bg(palette.background));
    frame.render_widget(back, chunks[0]);

    match detail {
        DetailScreen::Loading { id } => {
            let block = panel(palette, format!(" Post #{} ", id));
            let loading = Paragraph::new("Loading post...")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.loading));
            frame.render_widget(loading, chunks[1]);
        }
        DetailScreen::Failed { id, message } => {
            let block = panel(palette, format!(" Post #{} ", id));
            let error = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                )),
            ])
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(error, chunks[1]);
        }
        DetailScreen::Ready(post) => render_post(frame, post, palette, chunks[1]),
    }
}

fn panel(palette: &Palette, title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(title, palette.title()))
        .style(palette.base())
}

fn render_post(frame: &mut Frame, post: &BlogPost, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" User ID: {} ", post.user_id),
                Style::default().fg(palette.accent).bg(palette.selection),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" Blog ID: {} ", post.id),
                Style::default().fg(palette.muted).bg(palette.background),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            capitalize_words(&post.title),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .block(panel(palette, format!(" Post #{} ", post.id)))
    .wrap(Wrap { trim: true });
    frame.render_widget(header, chunks[0]);

    let body = Paragraph::new(post.body.as_str())
        .block(panel(palette, " BLOG CONTENT ".to_string()))
        .wrap(Wrap { trim: false })
        .style(palette.base());
    frame.render_widget(body, chunks[1]);
}
