use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use futures::future::{BoxFuture, FutureExt, Shared};

use crate::api::PostSource;
use crate::error::FetchError;
use crate::types::{BlogPost, QueryKey};

pub type PostList = Arc<Vec<BlogPost>>;

type FetchResult<T> = Result<T, FetchError>;
type SharedFetch<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

/// Observable state of one query, as seen by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Never requested, or dropped by a reload
    Idle,
    Pending,
    Success {
        value: T,
        fetched_at: DateTime<Local>,
    },
    Error(FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

impl<T> QueryState<T> {
    pub fn status(&self) -> QueryStatus {
        match self {
            QueryState::Idle => QueryStatus::Idle,
            QueryState::Pending => QueryStatus::Pending,
            QueryState::Success { .. } => QueryStatus::Success,
            QueryState::Error(_) => QueryStatus::Error,
        }
    }
}

enum Entry<T> {
    Pending {
        ticket: u64,
        fetch: SharedFetch<T>,
    },
    Ready {
        result: FetchResult<T>,
        fetched_at: DateTime<Local>,
    },
}

struct QueryTable<K, T> {
    entries: Mutex<HashMap<K, Entry<T>>>,
}

impl<K, T> QueryTable<K, T>
where
    K: Eq + Hash + Copy,
    T: Clone,
{
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self, key: &K) -> QueryState<T> {
        match self.lock().get(key) {
            None => QueryState::Idle,
            Some(Entry::Pending { .. }) => QueryState::Pending,
            Some(Entry::Ready {
                result: Ok(value),
                fetched_at,
            }) => QueryState::Success {
                value: value.clone(),
                fetched_at: *fetched_at,
            },
            Some(Entry::Ready { result: Err(e), .. }) => QueryState::Error(e.clone()),
        }
    }

    /// Store the result of request `ticket`, unless the entry was replaced or
    /// dropped while it was in flight.
    fn settle(&self, key: K, label: QueryKey, ticket: u64, result: FetchResult<T>) {
        let mut entries = self.lock();
        let current = matches!(
            entries.get(&key),
            Some(Entry::Pending { ticket: t, .. }) if *t == ticket
        );
        if !current {
            tracing::debug!(key = %label, "dropping result of invalidated request");
            return;
        }

        match &result {
            Ok(_) => tracing::debug!(key = %label, "query settled"),
            Err(e) => tracing::warn!(key = %label, error = %e, "query failed"),
        }
        entries.insert(
            key,
            Entry::Ready {
                result,
                fetched_at: Local::now(),
            },
        );
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

struct Inner {
    source: Arc<dyn PostSource>,
    all: QueryTable<(), PostList>,
    posts: QueryTable<u64, Arc<BlogPost>>,
    next_ticket: AtomicU64,
}

fn all_table(inner: &Inner) -> &QueryTable<(), PostList> {
    &inner.all
}

fn post_table(inner: &Inner) -> &QueryTable<u64, Arc<BlogPost>> {
    &inner.posts
}

/// Deduplicating, session-lifetime cache in front of a [`PostSource`].
///
/// Each query key has at most one request in flight; callers arriving while
/// it is pending join it. Successful results are kept until
/// [`FetchCache::invalidate_all`]. Failed results are kept for display but a
/// new call for the same key issues a fresh request.
///
/// Requests run on their own tokio task, so the fetch methods must be called
/// from within a runtime.
#[derive(Clone)]
pub struct FetchCache {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for FetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("source", &self.inner.source)
            .finish_non_exhaustive()
    }
}

impl FetchCache {
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                all: QueryTable::new(),
                posts: QueryTable::new(),
                next_ticket: AtomicU64::new(0),
            }),
        }
    }

    /// All posts in API order, cached under `"all"`.
    ///
    /// The request is registered before this returns; awaiting the future is
    /// only needed to observe the result.
    pub fn fetch_all_posts(&self) -> BoxFuture<'static, FetchResult<PostList>> {
        self.query((), QueryKey::All, all_table, |source| {
            async move { source.list_posts().await.map(Arc::new) }.boxed()
        })
    }

    /// One post, cached under `"post:{id}"`.
    pub fn fetch_post_by_id(&self, id: u64) -> BoxFuture<'static, FetchResult<Arc<BlogPost>>> {
        self.query(id, QueryKey::Post(id), post_table, move |source| {
            async move { source.get_post(id).await.map(Arc::new) }.boxed()
        })
    }

    pub fn all_posts_state(&self) -> QueryState<PostList> {
        self.inner.all.state(&())
    }

    pub fn post_state(&self, id: u64) -> QueryState<Arc<BlogPost>> {
        self.inner.posts.state(&id)
    }

    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        match key {
            QueryKey::All => self.all_posts_state().status(),
            QueryKey::Post(id) => self.post_state(*id).status(),
        }
    }

    /// Drop every entry. Requests still in flight complete for their callers
    /// but their results are not stored.
    pub fn invalidate_all(&self) {
        tracing::info!("invalidating fetch cache");
        self.inner.all.clear();
        self.inner.posts.clear();
    }

    fn query<K, T, F>(
        &self,
        key: K,
        label: QueryKey,
        table: fn(&Inner) -> &QueryTable<K, T>,
        request: F,
    ) -> BoxFuture<'static, FetchResult<T>>
    where
        K: Eq + Hash + Copy + Send + 'static,
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Arc<dyn PostSource>) -> BoxFuture<'static, FetchResult<T>>,
    {
        let mut entries = table(self.inner.as_ref()).lock();
        match entries.get(&key) {
            Some(Entry::Ready {
                result: Ok(value), ..
            }) => {
                tracing::debug!(key = %label, "cache hit");
                let value = value.clone();
                return futures::future::ready(Ok(value)).boxed();
            }
            Some(Entry::Pending { fetch, .. }) => {
                tracing::debug!(key = %label, "joining in-flight request");
                return fetch.clone().boxed();
            }
            Some(Entry::Ready { result: Err(_), .. }) | None => {}
        }

        let ticket = self.inner.next_ticket.fetch_add(1, Ordering::Relaxed);
        tracing::info!(key = %label, ticket, "issuing request");

        // The table lock is held until the entry is inserted, so `settle`
        // always finds this ticket even if the request finishes first.
        let inner = Arc::clone(&self.inner);
        let request = request(Arc::clone(&self.inner.source));
        let handle = tokio::spawn(async move {
            let result = request.await;
            table(inner.as_ref()).settle(key, label, ticket, result.clone());
            result
        });

        let fetch = async move {
            handle
                .await
                .unwrap_or_else(|e| Err(FetchError::Network(e.to_string())))
        }
        .boxed()
        .shared();

        entries.insert(
            key,
            Entry::Pending {
                ticket,
                fetch: fetch.clone(),
            },
        );
        fetch.boxed()
    }
}
