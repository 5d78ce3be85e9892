//! Maps view state and cache state to the screen to display.
//!
//! Nothing here performs I/O: [`evaluate`] only reads the cache entries for
//! the current view. Starting the queries is the caller's job.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::cache::{FetchCache, PostList, QueryState};
use crate::store::ViewState;
use crate::types::BlogPost;

pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` posts
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Clamp a 1-based page number into `[1, max(total_pages, 1)]`
pub fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, total_pages(len).max(1))
}

/// Posts shown on 1-based `page`
pub fn page_slice(posts: &[BlogPost], page: usize) -> &[BlogPost] {
    let page = clamp_page(page, posts.len());
    let start = ((page - 1) * PAGE_SIZE).min(posts.len());
    let end = (start + PAGE_SIZE).min(posts.len());
    &posts[start..end]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List(ListScreen),
    Detail(DetailScreen),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListScreen {
    Loading,
    Failed(String),
    Ready {
        posts: PostList,
        page: usize,
        total_pages: usize,
        fetched_at: DateTime<Local>,
    },
}

impl ListScreen {
    /// Posts on the displayed page; empty unless loaded
    pub fn items(&self) -> &[BlogPost] {
        match self {
            ListScreen::Ready { posts, page, .. } => page_slice(posts, *page),
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailScreen {
    Loading { id: u64 },
    Failed { id: u64, message: String },
    Ready(Arc<BlogPost>),
}

pub fn evaluate(view: &ViewState, page: usize, cache: &FetchCache) -> Screen {
    match view.selected_post_id {
        None => Screen::List(list_screen(cache.all_posts_state(), page)),
        Some(id) => Screen::Detail(detail_screen(id, cache.post_state(id))),
    }
}

fn list_screen(state: QueryState<PostList>, page: usize) -> ListScreen {
    match state {
        QueryState::Idle | QueryState::Pending => ListScreen::Loading,
        QueryState::Error(e) => ListScreen::Failed(e.to_string()),
        QueryState::Success { value, fetched_at } => ListScreen::Ready {
            page: clamp_page(page, value.len()),
            total_pages: total_pages(value.len()),
            posts: value,
            fetched_at,
        },
    }
}

fn detail_screen(id: u64, state: QueryState<Arc<BlogPost>>) -> DetailScreen {
    match state {
        QueryState::Idle | QueryState::Pending => DetailScreen::Loading { id },
        QueryState::Error(e) => DetailScreen::Failed {
            id,
            message: e.to_string(),
        },
        QueryState::Success { value, .. } => DetailScreen::Ready(value),
    }
}
