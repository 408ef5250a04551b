//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, to_bson},
    options::{FindOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::repository::ItemRepository;

/// MongoDB implementation of the ItemRepository
///
/// Documents carry the item id in an `id` field (the driver-assigned `_id`
/// is unused) so the wire and storage representations stay identical.
/// Favorite and view-count mutations are single-document atomic updates, so
/// concurrent calls for the same id serialize inside MongoDB.
pub struct MongoItemRepository {
    collection: Collection<Item>,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("inventory");
    /// let repo = MongoItemRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Item>("items");
        Self { collection }
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Item>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    fn id_filter(id: &Uuid) -> Document {
        doc! { "id": to_bson(id).unwrap_or(Bson::Null) }
    }

    /// Case-insensitive substring match over name and description
    fn search_filter(keyword: &str) -> Document {
        let pattern = escape_regex(keyword);
        doc! {
            "$or": [
                { "name": { "$regex": &pattern, "$options": "i" } },
                { "description": { "$regex": &pattern, "$options": "i" } },
            ]
        }
    }

    fn recency_sort() -> FindOptions {
        FindOptions::builder().sort(doc! { "updatedAt": -1 }).build()
    }
}

/// Escape regex metacharacters so keywords match as literal substrings
fn escape_regex(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(
            c,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, item), fields(item_name = %item.name))]
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        self.collection.insert_one(&item).await?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn replace(&self, item: Item) -> ItemResult<Item> {
        let result = self
            .collection
            .replace_one(Self::id_filter(&item.id), &item)
            .await?;

        if result.matched_count == 0 {
            return Err(ItemError::NotFound(item.id));
        }

        tracing::info!(item_id = %item.id, "Item updated successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let item = self.collection.find_one(Self::id_filter(&id)).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let items: Vec<Item> = cursor.try_collect().await?;
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn find_by_room(&self, room: &str) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "room": room })
            .with_options(Self::recency_sort())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_category(&self, category: &str) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "category": category })
            .with_options(Self::recency_sort())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_room_and_furniture(
        &self,
        room: &str,
        furniture: &str,
    ) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "room": room, "furniture": furniture })
            .with_options(Self::recency_sort())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn search(&self, keyword: &str) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .collection
            .find(Self::search_filter(keyword))
            .with_options(Self::recency_sort())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn distinct_rooms(&self) -> ItemResult<Vec<String>> {
        let values = self.collection.distinct("room", doc! {}).await?;

        let mut rooms: Vec<String> = values
            .iter()
            .filter_map(Bson::as_str)
            .map(str::to_string)
            .collect();
        rooms.sort();
        Ok(rooms)
    }

    #[instrument(skip(self))]
    async fn distinct_furniture(&self, room: &str) -> ItemResult<Vec<String>> {
        let filter = doc! {
            "room": room,
            "furniture": { "$nin": [Bson::Null, ""] },
        };
        let values = self.collection.distinct("furniture", filter).await?;

        let mut furniture: Vec<String> = values
            .iter()
            .filter_map(Bson::as_str)
            .map(str::to_string)
            .collect();
        furniture.sort();
        Ok(furniture)
    }

    #[instrument(skip(self))]
    async fn find_favorites(&self) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "favorite": true })
            .with_options(Self::recency_sort())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_top_by_view_count(&self, limit: i64) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let options = FindOptions::builder()
            // Secondary key keeps tie order stable
            .sort(doc! { "viewCount": -1, "id": 1 })
            .limit(limit)
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn set_favorite(&self, id: Uuid, favorite: bool) -> ItemResult<Item> {
        let update = doc! {
            "$set": {
                "favorite": favorite,
                "updatedAt": to_bson(&Utc::now()).unwrap_or(Bson::Null),
            }
        };

        self.collection
            .find_one_and_update(Self::id_filter(&id), update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn increment_view_count(&self, id: Uuid) -> ItemResult<Item> {
        let update = doc! {
            "$inc": { "viewCount": 1_i64 },
            "$set": { "updatedAt": to_bson(&Utc::now()).unwrap_or(Bson::Null) },
        };

        self.collection
            .find_one_and_update(Self::id_filter(&id), update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        let result = self.collection.delete_one(Self::id_filter(&id)).await?;

        if result.deleted_count == 0 {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests would require a MongoDB instance; the filter and
    // sort builders are verified as pure documents.

    #[test]
    fn test_id_filter_uses_id_field() {
        let id = Uuid::now_v7();
        let filter = MongoItemRepository::id_filter(&id);
        assert!(filter.contains_key("id"));
        assert_ne!(filter.get("id"), Some(&Bson::Null));
    }

    #[test]
    fn test_search_filter_covers_name_and_description() {
        let filter = MongoItemRepository::search_filter("lamp");
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);
    }

    #[test]
    fn test_search_filter_is_case_insensitive() {
        let filter = MongoItemRepository::search_filter("lamp");
        let name_clause = filter.get_array("$or").unwrap()[0]
            .as_document()
            .unwrap()
            .get_document("name")
            .unwrap();
        assert_eq!(name_clause.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_escape_regex_literals_metacharacters() {
        assert_eq!(escape_regex("c++"), "c\\+\\+");
        assert_eq!(escape_regex("a.b"), "a\\.b");
        assert_eq!(escape_regex("plain"), "plain");
    }

    #[test]
    fn test_recency_sort_orders_by_updated_at() {
        let options = MongoItemRepository::recency_sort();
        assert_eq!(options.sort, Some(doc! { "updatedAt": -1 }));
    }
}
