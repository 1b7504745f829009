use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::client::fallback::fallback_index;
use crate::client::search::search_index;
use crate::client::source::IndexSource;
use crate::models::document::{DocIndex, Document};
use crate::models::search::SearchResult;

type PendingLoad = Shared<BoxFuture<'static, Arc<DocIndex>>>;

#[derive(Default)]
struct LoadState {
    cache: Option<Arc<DocIndex>>,
    pending: Option<PendingLoad>,
}

fn lock(state: &Mutex<LoadState>) -> MutexGuard<'_, LoadState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read access to the documentation index with lazy, single-flight loading.
///
/// The first call to [`load_documentation`](Self::load_documentation)
/// starts one fetch from the [`IndexSource`]; every caller arriving while
/// it is in flight awaits the same pending load. The loaded index (or the
/// fallback, if the fetch failed) is cached and shared read-only from then on.
#[derive(Clone)]
pub struct DocumentationService {
    source: Arc<dyn IndexSource>,
    state: Arc<Mutex<LoadState>>,
}

impl DocumentationService {
    pub fn new(source: Arc<dyn IndexSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(LoadState::default())),
        }
    }

    /// Return the cached index, loading it first if needed.
    ///
    /// Never fails: a failed fetch yields [`fallback_index`].
    pub async fn load_documentation(&self) -> Arc<DocIndex> {
        let pending = {
            let mut state = lock(&self.state);
            if let Some(cached) = &state.cache {
                return cached.clone();
            }

            state
                .pending
                .get_or_insert_with(|| self.start_load())
                .clone()
        };

        pending.await
    }

    fn start_load(&self) -> PendingLoad {
        let source = self.source.clone();
        let state = self.state.clone();

        async move {
            let index = match source.fetch().await {
                Ok(index) => {
                    tracing::info!(
                        "Loaded documentation index with {} documents",
                        index.files.len()
                    );
                    index
                }
                Err(e) => {
                    tracing::warn!("Failed to load documentation index, using fallback: {e}");
                    fallback_index()
                }
            };

            let index = Arc::new(index);
            let mut state = lock(&state);
            state.cache = Some(index.clone());
            state.pending = None;
            index
        }
        .boxed()
        .shared()
    }

    /// Look up a document by exact slug.
    pub async fn get_document_by_slug(&self, slug: &str) -> Option<Document> {
        let index = self.load_documentation().await;
        index.files.iter().find(|doc| doc.slug == slug).cloned()
    }

    /// All documents in `category`, in index order.
    pub async fn get_documents_by_category(&self, category: &str) -> Vec<Document> {
        let index = self.load_documentation().await;
        index
            .files
            .iter()
            .filter(|doc| doc.category == category)
            .cloned()
            .collect()
    }

    /// Ranked substring search over titles and content.
    ///
    /// An empty or whitespace-only query returns no results without loading
    /// the index.
    pub async fn search_documents(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return vec![];
        }

        let index = self.load_documentation().await;
        search_index(&index, query)
    }

    /// The sorted category list of the loaded index.
    pub async fn get_categories(&self) -> Vec<String> {
        self.load_documentation().await.categories.clone()
    }
}
