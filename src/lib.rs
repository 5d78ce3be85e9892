//! Terminal browser for blog posts served by a JSONPlaceholder-style API.
//!
//! The core is three pieces: [`cache::FetchCache`] (deduplicated, cached
//! reads), [`store::ViewStore`] (selected post and theme) and
//! [`view::evaluate`] (pure mapping of both to a [`view::Screen`]). The rest
//! is the ratatui shell around them.

pub mod action;
pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod store;
pub mod tui;
pub mod types;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testing;
