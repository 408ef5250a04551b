use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::Item;

/// Default number of items returned by the popularity ranking.
pub const DEFAULT_POPULAR_LIMIT: i64 = 5;

/// Repository trait for Item persistence
///
/// This trait defines the data access interface for items. Implementations
/// can use different storage backends (MongoDB for production, in-memory for
/// tests). Query methods returning listings order by `updated_at` descending
/// unless noted otherwise.
///
/// `set_favorite` and `increment_view_count` are single-document atomic
/// updates: concurrent calls for the same id must serialize inside the store
/// so no update is lost.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a freshly-constructed item
    async fn insert(&self, item: Item) -> ItemResult<Item>;

    /// Replace the stored record with the same id; fails with `NotFound`
    /// if no such record exists
    async fn replace(&self, item: Item) -> ItemResult<Item>;

    /// Get an item by id
    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// All items, in no guaranteed order
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// Items in the given room
    async fn find_by_room(&self, room: &str) -> ItemResult<Vec<Item>>;

    /// Items with the given category
    async fn find_by_category(&self, category: &str) -> ItemResult<Vec<Item>>;

    /// Items in the given room and furniture
    async fn find_by_room_and_furniture(
        &self,
        room: &str,
        furniture: &str,
    ) -> ItemResult<Vec<Item>>;

    /// Items whose name or description contains `keyword`, case-insensitively
    async fn search(&self, keyword: &str) -> ItemResult<Vec<Item>>;

    /// Distinct room names, deduplicated and lexicographically sorted
    async fn distinct_rooms(&self) -> ItemResult<Vec<String>>;

    /// Distinct furniture names within a room, deduplicated and sorted,
    /// excluding unset/empty values
    async fn distinct_furniture(&self, room: &str) -> ItemResult<Vec<String>>;

    /// Items flagged as favorite
    async fn find_favorites(&self) -> ItemResult<Vec<Item>>;

    /// The `limit` items with the highest view count, descending, with a
    /// stable tie order
    async fn find_top_by_view_count(&self, limit: i64) -> ItemResult<Vec<Item>>;

    /// Atomically set the favorite flag and refresh `updated_at`
    async fn set_favorite(&self, id: Uuid, favorite: bool) -> ItemResult<Item>;

    /// Atomically increment the view counter and refresh `updated_at`
    async fn increment_view_count(&self, id: Uuid) -> ItemResult<Item>;

    /// Delete an item by id; never affects other records
    async fn delete(&self, id: Uuid) -> ItemResult<()>;
}
