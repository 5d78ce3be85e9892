//! In-memory `PostSource` for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::api::PostSource;
use crate::error::FetchError;
use crate::types::BlogPost;

pub fn post(id: u64) -> BlogPost {
    BlogPost {
        id,
        user_id: (id - 1) / 10 + 1,
        title: format!("post title {}", id),
        body: format!("body of post {}", id),
    }
}

#[derive(Debug, Default)]
pub struct StubSource {
    posts: Vec<BlogPost>,
    failure: Option<FetchError>,
    gate: Option<Arc<Semaphore>>,
    list_calls: AtomicUsize,
    post_calls: AtomicUsize,
}

impl StubSource {
    /// Serves posts with ids `1..=count`.
    pub fn with_posts(count: u64) -> Self {
        Self {
            posts: (1..=count).map(post).collect(),
            ..Self::default()
        }
    }

    /// Fails every request with `err`.
    pub fn failing(err: FetchError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    /// Holds every request until a permit is added to the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn post_calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait]
impl PostSource for StubSource {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate().await;
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.posts.clone()),
        }
    }

    async fn get_post(&self, id: u64) -> Result<BlogPost, FetchError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate().await;
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(FetchError::NotFound(id))
    }
}
