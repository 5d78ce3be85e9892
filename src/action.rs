use crate::types::QueryKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    CursorUp,
    CursorDown,
    Open,

    // Pagination (list view only, never touches the network)
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    ToggleTheme,

    // Queries
    LoadPosts,
    Reload,
    QuerySettled(QueryKey),

    None,
}
