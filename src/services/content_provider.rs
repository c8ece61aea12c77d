// src/services/content_provider.rs
//
// Consumer-facing catalog provider
//
// PRINCIPLES:
// - Browse reads come from an in-memory cache, refreshed on demand
// - A failed start degrades to not-ready and an empty catalog; it
//   never panics and never hides the error from the log
// - The repository behind the provider is swappable (trait object)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::{ContentDetails, ContentKind, ContentRecord};
use crate::error::CatalogResult;
use crate::repositories::{CatalogRepository, SqliteCatalogRepository};
use crate::store::StorageSlot;

/// Serves the catalog to browsing surfaces: a cached content list for
/// rows and rails, plus pass-through detail reads.
///
/// Starts not-ready. `start` opens the store off the async runtime's
/// blocking pool and loads the cache; if anything fails the provider
/// stays usable but empty.
pub struct ContentProvider {
    repository: RwLock<Option<Arc<dyn CatalogRepository>>>,
    catalog: RwLock<Vec<ContentRecord>>,
    ready: AtomicBool,
    loading: AtomicBool,
}

impl ContentProvider {
    pub fn new() -> Self {
        Self {
            repository: RwLock::new(None),
            catalog: RwLock::new(Vec::new()),
            ready: AtomicBool::new(false),
            loading: AtomicBool::new(true),
        }
    }

    /// Open the catalog backed by `slot` and load the browse cache.
    ///
    /// Store opening does file IO and page copies, so it runs via
    /// `spawn_blocking`. Failures are logged and leave the provider
    /// not-ready with an empty catalog; a later `start` may retry.
    pub async fn start(&self, slot: Box<dyn StorageSlot>) {
        if self.ready.load(Ordering::SeqCst) {
            return;
        }
        self.loading.store(true, Ordering::SeqCst);

        let opened =
            tokio::task::spawn_blocking(move || SqliteCatalogRepository::open(slot)).await;

        match opened {
            Ok(Ok(repository)) => self.finish_start(Arc::new(repository)),
            Ok(Err(e)) => {
                log::error!("Failed to open catalog store: {}", e);
                self.loading.store(false, Ordering::SeqCst);
            }
            Err(e) => {
                log::error!("Catalog open task failed: {}", e);
                self.loading.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Attach an already opened repository instead of opening one.
    pub fn start_with_repository(&self, repository: Arc<dyn CatalogRepository>) {
        if self.ready.load(Ordering::SeqCst) {
            return;
        }
        self.loading.store(true, Ordering::SeqCst);
        self.finish_start(repository);
    }

    fn finish_start(&self, repository: Arc<dyn CatalogRepository>) {
        match repository.list_content() {
            Ok(rows) => {
                log::info!("Catalog ready with {} titles", rows.len());
                *self.catalog.write().unwrap() = rows;
                *self.repository.write().unwrap() = Some(repository);
                self.ready.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                log::error!("Failed to load catalog: {}", e);
            }
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    /// True once the catalog opened and the cache loaded.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// True while a start is in flight (and before any start).
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The cached content list, in insertion order.
    pub fn catalog(&self) -> Vec<ContentRecord> {
        self.catalog.read().unwrap().clone()
    }

    /// The hero row: the first title in the catalog.
    pub fn featured(&self) -> Option<ContentRecord> {
        self.catalog.read().unwrap().first().cloned()
    }

    /// All cached titles of one kind.
    pub fn of_kind(&self, kind: ContentKind) -> Vec<ContentRecord> {
        self.catalog
            .read()
            .unwrap()
            .iter()
            .filter(|row| row.kind == kind)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over title and genre.
    ///
    /// A blank query matches nothing. Non-blank queries are matched
    /// verbatim, surrounding whitespace included.
    pub fn search(&self, query: &str) -> Vec<ContentRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        self.catalog
            .read()
            .unwrap()
            .iter()
            .filter(|row| {
                row.title.to_lowercase().contains(&needle)
                    || row.genre.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Re-read the content list from the store into the cache.
    ///
    /// Callers invoke this after admin mutations; nothing refreshes
    /// automatically. Without a started repository this is a no-op.
    pub fn refresh(&self) -> CatalogResult<()> {
        let repository = self.repository.read().unwrap().clone();
        let Some(repository) = repository else {
            return Ok(());
        };

        let rows = repository.list_content()?;
        *self.catalog.write().unwrap() = rows;
        Ok(())
    }

    /// One title with episodes, cast and crew. `Ok(None)` when the id
    /// is unknown or the provider never became ready.
    pub fn get_content(&self, id: i64) -> CatalogResult<Option<ContentDetails>> {
        let repository = self.repository.read().unwrap().clone();
        let Some(repository) = repository else {
            return Ok(None);
        };

        repository.get_content(id)
    }
}

impl Default for ContentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::repositories::MockCatalogRepository;
    use crate::store::{MemorySlot, STORE_IMAGE_KEY};

    async fn started_provider() -> ContentProvider {
        let provider = ContentProvider::new();
        provider.start(Box::new(MemorySlot::new())).await;
        provider
    }

    #[tokio::test]
    async fn test_start_loads_seeded_catalog() {
        let provider = started_provider().await;

        assert!(provider.is_ready());
        assert!(!provider.is_loading());

        let catalog = provider.catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].title, "Dhurandhar");
    }

    #[tokio::test]
    async fn test_provider_starts_loading_and_not_ready() {
        let provider = ContentProvider::new();

        assert!(!provider.is_ready());
        assert!(provider.is_loading());
        assert!(provider.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_start_when_already_ready_is_noop() {
        let provider = started_provider().await;

        provider.start(Box::new(MemorySlot::new())).await;

        assert!(provider.is_ready());
        assert_eq!(provider.catalog().len(), 2);
    }

    #[tokio::test]
    async fn test_start_with_corrupt_slot_degrades() {
        let slot = MemorySlot::new();
        slot.put(STORE_IMAGE_KEY, "not an image").unwrap();

        let provider = ContentProvider::new();
        provider.start(Box::new(slot)).await;

        assert!(!provider.is_ready());
        assert!(!provider.is_loading());
        assert!(provider.catalog().is_empty());
        assert!(provider.featured().is_none());
        assert!(provider.get_content(1).unwrap().is_none());
        provider.refresh().unwrap();
    }

    #[tokio::test]
    async fn test_featured_is_first_title() {
        let provider = started_provider().await;

        let featured = provider.featured().unwrap();
        assert_eq!(featured.title, "Dhurandhar");
    }

    #[tokio::test]
    async fn test_of_kind_splits_movies_and_series() {
        let provider = started_provider().await;

        let movies = provider.of_kind(ContentKind::Movie);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Dhurandhar");

        let series = provider.of_kind(ContentKind::Series);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].title, "Doraemon");
    }

    #[tokio::test]
    async fn test_search_matches_title_and_genre() {
        let provider = started_provider().await;

        let by_title = provider.search("dora");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Doraemon");

        let by_genre = provider.search("action");
        assert_eq!(by_genre.len(), 1);
        assert_eq!(by_genre[0].title, "Dhurandhar");

        let case_insensitive = provider.search("DHUR");
        assert_eq!(case_insensitive.len(), 1);

        assert!(provider.search("zzz").is_empty());

        // The query is not trimmed before matching
        assert!(provider.search(" dora ").is_empty());
    }

    #[tokio::test]
    async fn test_search_blank_query_matches_nothing() {
        let provider = started_provider().await;

        assert!(provider.search("").is_empty());
        assert!(provider.search("   ").is_empty());
    }

    #[tokio::test]
    async fn test_get_content_returns_details() {
        let provider = started_provider().await;
        let series_id = provider.catalog()[1].id;

        let details = provider.get_content(series_id).unwrap().unwrap();
        assert_eq!(details.content.title, "Doraemon");
        assert_eq!(details.episodes.len(), 150);

        assert!(provider.get_content(9999).unwrap().is_none());
    }

    #[test]
    fn test_refresh_picks_up_repository_writes() {
        use crate::domain::NewContent;

        let repository = Arc::new(
            SqliteCatalogRepository::open(Box::new(MemorySlot::new())).unwrap(),
        );

        let provider = ContentProvider::new();
        provider.start_with_repository(repository.clone());
        assert_eq!(provider.catalog().len(), 2);

        repository
            .add_content(&NewContent {
                title: "Added Later".to_string(),
                year: 2026,
                genre: "Thriller".to_string(),
                rating: "7.5".to_string(),
                poster_url: String::new(),
                banner_url: String::new(),
                kind: ContentKind::Movie,
                duration: "1h 50m".to_string(),
                overview: String::new(),
                streaming_url: String::new(),
            })
            .unwrap();

        // The cache is stale until someone refreshes it
        assert_eq!(provider.catalog().len(), 2);

        provider.refresh().unwrap();
        assert_eq!(provider.catalog().len(), 3);
        assert_eq!(provider.catalog()[2].title, "Added Later");
    }

    #[test]
    fn test_failing_repository_leaves_provider_not_ready() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_list_content()
            .times(1)
            .returning(|| Err(CatalogError::Other("load failed".to_string())));

        let provider = ContentProvider::new();
        provider.start_with_repository(Arc::new(mock));

        assert!(!provider.is_ready());
        assert!(!provider.is_loading());
        assert!(provider.catalog().is_empty());
    }
}
