use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::cache::{FetchCache, QueryState};
use crate::event::Event;
use crate::store::ViewStore;
use crate::types::QueryKey;
use crate::view::{self, Screen};

pub struct App {
    pub store: ViewStore,
    pub cache: FetchCache,
    /// 1-based list page; clamped against the loaded list when evaluated
    pub page: usize,
    /// Highlighted row on the current page
    pub cursor: usize,
    pub should_quit: bool,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(cache: FetchCache, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            store: ViewStore::default(),
            cache,
            page: 1,
            cursor: 0,
            should_quit: false,
            action_tx,
        }
    }

    /// The screen for the current view state and cache contents
    pub fn screen(&self) -> Screen {
        view::evaluate(&self.store.state(), self.page, &self.cache)
    }

    fn in_detail(&self) -> bool {
        self.store.state().selected_post_id.is_some()
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadPosts,
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        let in_detail = self.in_detail();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if in_detail {
                    Action::Back
                } else {
                    Action::Quit
                }
            }
            KeyCode::Backspace if in_detail => Action::Back,
            KeyCode::Enter => {
                if in_detail {
                    Action::Back
                } else {
                    Action::Open
                }
            }
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('r') => Action::Reload,
            _ if in_detail => Action::None,
            KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                Action::NextPage
            }
            KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                Action::PrevPage
            }
            KeyCode::Char('g') | KeyCode::Home => Action::FirstPage,
            KeyCode::Char('G') | KeyCode::End => Action::LastPage,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => {
                if self.in_detail() {
                    self.store.clear_selection();
                    // The list always comes back on its first page
                    self.page = 1;
                    self.cursor = 0;
                    self.ensure_list_query();
                } else {
                    self.should_quit = true;
                }
            }
            Action::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::CursorDown => {
                let rows = self.visible_rows();
                if rows > 0 && self.cursor < rows - 1 {
                    self.cursor += 1;
                }
            }
            Action::Open => {
                if self.in_detail() {
                    return;
                }
                if let Screen::List(list) = self.screen() {
                    if let Some(post) = list.items().get(self.cursor) {
                        self.open_post(post.id);
                    }
                }
            }
            Action::NextPage => self.set_page(self.page.saturating_add(1)),
            Action::PrevPage => self.set_page(self.page.saturating_sub(1)),
            Action::FirstPage => self.set_page(1),
            Action::LastPage => self.set_page(usize::MAX),
            Action::ToggleTheme => {
                self.store.toggle_dark_mode();
            }
            Action::LoadPosts => {
                self.spawn_fetch_all();
            }
            Action::Reload => {
                self.cache.invalidate_all();
                match self.store.state().selected_post_id {
                    Some(id) => self.spawn_fetch_post(id),
                    None => self.spawn_fetch_all(),
                }
            }
            Action::QuerySettled(key) => {
                let shown = match self.store.state().selected_post_id {
                    Some(id) => QueryKey::Post(id),
                    None => QueryKey::All,
                };
                if key == shown {
                    self.cursor = self.cursor.min(self.visible_rows().saturating_sub(1));
                } else {
                    tracing::debug!(%key, %shown, "result for a screen no longer shown");
                }
            }
            Action::None => {}
        }
    }

    /// Switch to the detail view for `id` and query it.
    pub fn open_post(&mut self, id: u64) {
        self.store.select_post(id);
        self.spawn_fetch_post(id);
    }

    fn visible_rows(&self) -> usize {
        match self.screen() {
            Screen::List(list) => list.items().len(),
            Screen::Detail(_) => 0,
        }
    }

    fn set_page(&mut self, page: usize) {
        let QueryState::Success { value, .. } = self.cache.all_posts_state() else {
            return;
        };
        let page = view::clamp_page(page, value.len());
        if page != self.page {
            self.page = page;
            self.cursor = 0;
        }
    }

    fn ensure_list_query(&self) {
        if matches!(self.cache.all_posts_state(), QueryState::Idle) {
            self.spawn_fetch_all();
        }
    }

    fn spawn_fetch_all(&self) {
        let tx = self.action_tx.clone();
        let fetch = self.cache.fetch_all_posts();
        tokio::spawn(async move {
            // Failures stay in the cache entry and are rendered from there.
            if let Err(e) = fetch.await {
                tracing::debug!(error = %e, "post list unavailable");
            }
            tx.send(Action::QuerySettled(QueryKey::All)).ok();
        });
    }

    fn spawn_fetch_post(&self, id: u64) {
        let tx = self.action_tx.clone();
        let fetch = self.cache.fetch_post_by_id(id);
        tokio::spawn(async move {
            if let Err(e) = fetch.await {
                tracing::debug!(id, error = %e, "post unavailable");
            }
            tx.send(Action::QuerySettled(QueryKey::Post(id))).ok();
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::testing::StubSource;
    use crate::view::{DetailScreen, ListScreen};

    fn test_app(stub: Arc<StubSource>) -> (App, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(FetchCache::new(stub), tx), rx)
    }

    async fn apply_next(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Action>) {
        let action = rx.recv().await.unwrap();
        app.update(action);
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn list_ids(app: &App) -> Vec<u64> {
        match app.screen() {
            Screen::List(list) => list.items().iter().map(|p| p.id).collect(),
            other => panic!("expected list screen, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn init_loads_first_page() {
        let (mut app, mut rx) = test_app(Arc::new(StubSource::with_posts(25)));

        let action = app.handle_event(Event::Init);
        assert_eq!(action, Action::LoadPosts);
        app.update(action);
        assert_eq!(app.screen(), Screen::List(ListScreen::Loading));

        apply_next(&mut app, &mut rx).await;
        assert_eq!(list_ids(&app), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn paging_stays_local_and_in_bounds() {
        let stub = Arc::new(StubSource::with_posts(25));
        let (mut app, mut rx) = test_app(stub.clone());
        app.update(Action::LoadPosts);
        apply_next(&mut app, &mut rx).await;

        app.update(Action::NextPage);
        assert_eq!(app.page, 2);
        assert_eq!(list_ids(&app), (11..=20).collect::<Vec<_>>());

        app.update(Action::LastPage);
        app.update(Action::NextPage);
        assert_eq!(app.page, 3);
        assert_eq!(list_ids(&app), (21..=25).collect::<Vec<_>>());

        app.update(Action::FirstPage);
        app.update(Action::PrevPage);
        assert_eq!(app.page, 1);
        assert_eq!(stub.list_calls(), 1);
    }

    #[tokio::test]
    async fn paging_before_load_is_ignored() {
        let (stub, _gate) = StubSource::with_posts(25).gated();
        let (mut app, _rx) = test_app(Arc::new(stub));
        app.update(Action::LoadPosts);

        app.update(Action::NextPage);
        assert_eq!(app.page, 1);
    }

    #[tokio::test]
    async fn cursor_is_bounded_by_page_rows() {
        let (mut app, mut rx) = test_app(Arc::new(StubSource::with_posts(3)));
        app.update(Action::LoadPosts);
        apply_next(&mut app, &mut rx).await;

        for _ in 0..5 {
            app.update(Action::CursorDown);
        }
        assert_eq!(app.cursor, 2);
        app.update(Action::CursorUp);
        assert_eq!(app.cursor, 1);
    }

    #[tokio::test]
    async fn open_shows_detail_and_back_returns_to_list() {
        let stub = Arc::new(StubSource::with_posts(12));
        let (mut app, mut rx) = test_app(stub.clone());
        app.update(Action::LoadPosts);
        apply_next(&mut app, &mut rx).await;

        app.update(Action::NextPage);
        app.update(Action::CursorDown);
        app.update(app.handle_event(key(KeyCode::Enter)));
        assert_eq!(app.store.state().selected_post_id, Some(12));

        apply_next(&mut app, &mut rx).await;
        match app.screen() {
            Screen::Detail(DetailScreen::Ready(post)) => assert_eq!(post.id, 12),
            other => panic!("expected detail screen, got {:?}", other),
        }

        app.update(app.handle_event(key(KeyCode::Esc)));
        assert_eq!(app.store.state().selected_post_id, None);
        assert_eq!(app.page, 1);
        assert_eq!(app.cursor, 0);
        assert_eq!(list_ids(&app), (1..=10).collect::<Vec<_>>());
        assert_eq!(stub.list_calls(), 1);
    }

    #[tokio::test]
    async fn back_from_a_later_page_resets_to_first_page() {
        let (mut app, mut rx) = test_app(Arc::new(StubSource::with_posts(25)));
        app.update(Action::LoadPosts);
        apply_next(&mut app, &mut rx).await;

        app.update(Action::NextPage);
        assert_eq!(app.page, 2);
        app.open_post(11);
        app.update(Action::Back);

        assert_eq!(app.page, 1);
        assert_eq!(list_ids(&app), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn missing_post_offers_a_way_back() {
        let (mut app, mut rx) = test_app(Arc::new(StubSource::with_posts(3)));

        app.open_post(999);
        apply_next(&mut app, &mut rx).await;
        assert!(matches!(
            app.screen(),
            Screen::Detail(DetailScreen::Failed { id: 999, .. })
        ));

        let back = app.handle_event(key(KeyCode::Enter));
        assert_eq!(back, Action::Back);
        app.update(back);
        assert!(matches!(app.screen(), Screen::List(_)));
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn late_detail_result_does_not_replace_list() {
        let (stub, gate) = StubSource::with_posts(3).gated();
        let (mut app, mut rx) = test_app(Arc::new(stub));

        app.open_post(2);
        app.update(Action::Back);
        gate.add_permits(2);

        // Post 2 settles after the list query was started by `Back`.
        apply_next(&mut app, &mut rx).await;
        apply_next(&mut app, &mut rx).await;
        assert!(matches!(app.screen(), Screen::List(ListScreen::Ready { .. })));
    }

    #[tokio::test]
    async fn reload_refetches_current_view() {
        let stub = Arc::new(StubSource::with_posts(3));
        let (mut app, mut rx) = test_app(stub.clone());
        app.update(Action::LoadPosts);
        apply_next(&mut app, &mut rx).await;

        app.update(app.handle_event(key(KeyCode::Char('r'))));
        assert_eq!(app.screen(), Screen::List(ListScreen::Loading));
        apply_next(&mut app, &mut rx).await;

        assert_eq!(stub.list_calls(), 2);
        assert_eq!(list_ids(&app), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn theme_toggle_works_on_both_screens() {
        let (mut app, _rx) = test_app(Arc::new(StubSource::with_posts(3)));

        app.update(app.handle_event(key(KeyCode::Char('t'))));
        assert!(app.store.state().dark_mode);

        app.open_post(1);
        app.update(app.handle_event(key(KeyCode::Char('t'))));
        assert!(!app.store.state().dark_mode);
    }

    #[tokio::test]
    async fn quit_keys_depend_on_screen() {
        let (mut app, _rx) = test_app(Arc::new(StubSource::with_posts(3)));
        assert_eq!(app.handle_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.handle_event(key(KeyCode::Char('j'))), Action::CursorDown);

        app.open_post(1);
        assert_eq!(app.handle_event(key(KeyCode::Char('q'))), Action::Back);
        assert_eq!(app.handle_event(key(KeyCode::Backspace)), Action::Back);
        assert_eq!(app.handle_event(key(KeyCode::Char('j'))), Action::None);

        app.update(Action::Back);
        app.update(Action::Back);
        assert!(app.should_quit);
    }
}
