use tokio::sync::watch;

/// Session-scoped UI state shared by every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// `None` means the list view is shown
    pub selected_post_id: Option<u64>,
    pub dark_mode: bool,
}

/// Owner of the [`ViewState`]. Every mutation is published to subscribers.
#[derive(Debug)]
pub struct ViewStore {
    tx: watch::Sender<ViewState>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl ViewStore {
    pub fn new(initial: ViewState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn state(&self) -> ViewState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    pub fn select_post(&self, id: u64) {
        tracing::debug!(id, "select post");
        self.tx.send_modify(|s| s.selected_post_id = Some(id));
    }

    pub fn clear_selection(&self) {
        tracing::debug!("clear selection");
        self.tx.send_modify(|s| s.selected_post_id = None);
    }

    pub fn toggle_dark_mode(&self) {
        self.tx.send_modify(|s| s.dark_mode = !s.dark_mode);
        tracing::debug!(dark_mode = self.state().dark_mode, "toggle theme");
    }
}
