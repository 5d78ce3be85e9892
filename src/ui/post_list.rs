use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::view::ListScreen;

use super::capitalize_words;
use super::theme::Palette;

pub fn render(frame: &mut Frame, list: &ListScreen, cursor: usize, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(" Posts ", palette.title()))
        .style(palette.base());

    match list {
        ListScreen::Loading => {
            let loading = Paragraph::new("Loading posts...")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.loading));
            frame.render_widget(loading, area);
        }
        ListScreen::Failed(message) => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled("Press r to reload", palette.secondary())),
            ];
            let error = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(error, area);
        }
        ListScreen::Ready { posts, .. } if posts.is_empty() => {
            let empty = Paragraph::new("No posts")
                .block(block)
                .style(palette.secondary());
            frame.render_widget(empty, area);
        }
        ListScreen::Ready {
            page,
            total_pages,
            fetched_at,
            ..
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);

            render_items(frame, list, cursor, palette, block, chunks[0]);

            let mut spans = Vec::new();
            if *page > 1 {
                spans.push(Span::styled("< ", palette.title()));
            }
            spans.push(Span::styled(
                format!("Page {} of {}", page, total_pages),
                Style::default().fg(palette.text),
            ));
            if page < total_pages {
                spans.push(Span::styled(" >", palette.title()));
            }
            spans.push(Span::styled(
                format!("   fetched {}", fetched_at.format("%H:%M:%S")),
                palette.secondary(),
            ));

            let pagination = Paragraph::new(Line::from(spans))
                .alignment(Alignment::Center)
                .style(Style::default().bg(palette.background));
            frame.render_widget(pagination, chunks[1]);
        }
    }
}

fn render_items(
    frame: &mut Frame,
    list: &ListScreen,
    cursor: usize,
    palette: &Palette,
    block: Block,
    area: Rect,
) {
    let posts = list.items();

    let items: Vec<ListItem> = posts
        .iter()
        .map(|post| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    capitalize_words(&post.title),
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("User ID: {} • Blog ID: {}", post.user_id, post.id),
                    palette.secondary(),
                )),
            ])
        })
        .collect();

    let widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.selection))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(cursor.min(posts.len().saturating_sub(1))));

    frame.render_stateful_widget(widget, area, &mut state);
}
