//! Inventory catalog service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemDraft, Stats};
use crate::repository::{DEFAULT_POPULAR_LIMIT, ItemRepository};
use crate::storage::{AttachmentStore, AttachmentUpload};

/// Catalog service providing the item lifecycle and query operations
///
/// The service layer owns validation and the attachment policy and
/// orchestrates the item repository and the attachment store. The stores
/// stay dumb persistence.
pub struct InventoryService<R: ItemRepository, S: AttachmentStore> {
    repository: Arc<R>,
    attachments: Arc<S>,
}

impl<R: ItemRepository, S: AttachmentStore> InventoryService<R, S> {
    /// Create a new InventoryService over the given stores
    pub fn new(repository: R, attachments: S) -> Self {
        Self {
            repository: Arc::new(repository),
            attachments: Arc::new(attachments),
        }
    }

    /// Persist uploads in order and collect their references.
    ///
    /// Any write failure aborts the enclosing create/update before an item
    /// record is persisted, so no record ever points at a missing blob.
    async fn save_attachments(&self, uploads: Vec<AttachmentUpload>) -> ItemResult<Vec<String>> {
        let mut references = Vec::with_capacity(uploads.len());
        for upload in uploads {
            references.push(
                self.attachments
                    .save(&upload.filename, &upload.content)
                    .await?,
            );
        }
        Ok(references)
    }

    /// Create a new item
    #[instrument(skip(self, draft, uploads), fields(item_name = %draft.name))]
    pub async fn create_item(
        &self,
        draft: ItemDraft,
        uploads: Vec<AttachmentUpload>,
    ) -> ItemResult<Item> {
        draft
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let images = self.save_attachments(uploads).await?;
        self.repository.insert(Item::new(draft, images)).await
    }

    /// Update an existing item.
    ///
    /// The draft replaces every editable field wholesale. New uploads
    /// replace the entire image list; without uploads the stored references
    /// stay untouched. Superseded blobs are left on disk (see DESIGN.md on
    /// orphaned attachments). `favorite` and `view_count` are not affected.
    #[instrument(skip(self, draft, uploads))]
    pub async fn update_item(
        &self,
        id: Uuid,
        draft: ItemDraft,
        uploads: Vec<AttachmentUpload>,
    ) -> ItemResult<Item> {
        draft
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let mut item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let images = if uploads.is_empty() {
            None
        } else {
            Some(self.save_attachments(uploads).await?)
        };

        item.apply_draft(draft, images);
        self.repository.replace(item).await
    }

    /// Delete an item.
    ///
    /// Referenced attachment blobs are intentionally not deleted.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> ItemResult<()> {
        self.repository.delete(id).await
    }

    /// Get an item by id
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// All items
    #[instrument(skip(self))]
    pub async fn get_all_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    /// Items in the given room, most recently updated first
    #[instrument(skip(self))]
    pub async fn get_items_by_room(&self, room: &str) -> ItemResult<Vec<Item>> {
        self.repository.find_by_room(room).await
    }

    /// Items matching the keyword in name or description
    #[instrument(skip(self))]
    pub async fn search_items(&self, keyword: &str) -> ItemResult<Vec<Item>> {
        self.repository.search(keyword).await
    }

    /// Distinct room names, sorted
    #[instrument(skip(self))]
    pub async fn get_all_rooms(&self) -> ItemResult<Vec<String>> {
        self.repository.distinct_rooms().await
    }

    /// Distinct furniture names within a room, sorted
    #[instrument(skip(self))]
    pub async fn get_furniture_by_room(&self, room: &str) -> ItemResult<Vec<String>> {
        self.repository.distinct_furniture(room).await
    }

    /// Items flagged as favorite
    #[instrument(skip(self))]
    pub async fn get_favorite_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_favorites().await
    }

    /// The most viewed items
    #[instrument(skip(self))]
    pub async fn get_popular_items(&self) -> ItemResult<Vec<Item>> {
        self.repository
            .find_top_by_view_count(DEFAULT_POPULAR_LIMIT)
            .await
    }

    /// Set the favorite flag
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, id: Uuid, favorite: bool) -> ItemResult<Item> {
        self.repository.set_favorite(id, favorite).await
    }

    /// Record one view of the item.
    ///
    /// Safe under concurrent invocation for the same id: the repository
    /// increments atomically, so no update is lost.
    #[instrument(skip(self))]
    pub async fn increment_view_count(&self, id: Uuid) -> ItemResult<()> {
        self.repository.increment_view_count(id).await?;
        Ok(())
    }

    /// Catalog statistics: total item count and the distinct room names
    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> ItemResult<Stats> {
        let items = self.repository.find_all().await?;
        let rooms = self.repository.distinct_rooms().await?;

        Ok(Stats {
            total_items: items.len() as u64,
            rooms,
        })
    }
}

impl<R: ItemRepository, S: AttachmentStore> Clone for InventoryService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            attachments: Arc::clone(&self.attachments),
        }
    }
}
