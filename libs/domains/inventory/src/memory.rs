//! In-memory implementation of ItemRepository.
//!
//! Backs tests and local development without a MongoDB instance. Mutations
//! run under a single write lock, which gives the same per-record
//! serialization guarantee as the MongoDB single-document updates.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::repository::ItemRepository;

/// In-memory ItemRepository over a locked map
#[derive(Default)]
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<Uuid, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_recency(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    items
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn replace(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        if !items.contains_key(&item.id) {
            return Err(ItemError::NotFound(item.id));
        }
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn find_by_room(&self, room: &str) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(by_recency(
            items.values().filter(|i| i.room == room).cloned().collect(),
        ))
    }

    async fn find_by_category(&self, category: &str) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(by_recency(
            items
                .values()
                .filter(|i| i.category.as_deref() == Some(category))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_room_and_furniture(
        &self,
        room: &str,
        furniture: &str,
    ) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(by_recency(
            items
                .values()
                .filter(|i| i.room == room && i.furniture.as_deref() == Some(furniture))
                .cloned()
                .collect(),
        ))
    }

    async fn search(&self, keyword: &str) -> ItemResult<Vec<Item>> {
        let needle = keyword.to_lowercase();
        let items = self.items.read().await;
        Ok(by_recency(
            items
                .values()
                .filter(|i| {
                    i.name.to_lowercase().contains(&needle)
                        || i.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect(),
        ))
    }

    async fn distinct_rooms(&self) -> ItemResult<Vec<String>> {
        let items = self.items.read().await;
        let rooms: BTreeSet<String> = items.values().map(|i| i.room.clone()).collect();
        Ok(rooms.into_iter().collect())
    }

    async fn distinct_furniture(&self, room: &str) -> ItemResult<Vec<String>> {
        let items = self.items.read().await;
        let furniture: BTreeSet<String> = items
            .values()
            .filter(|i| i.room == room)
            .filter_map(|i| i.furniture.clone())
            .filter(|f| !f.is_empty())
            .collect();
        Ok(furniture.into_iter().collect())
    }

    async fn find_favorites(&self) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(by_recency(
            items.values().filter(|i| i.favorite).cloned().collect(),
        ))
    }

    async fn find_top_by_view_count(&self, limit: i64) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut ranked: Vec<Item> = items.values().cloned().collect();
        // Secondary key keeps tie order stable
        ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count).then(a.id.cmp(&b.id)));
        ranked.truncate(limit.max(0) as usize);
        Ok(ranked)
    }

    async fn set_favorite(&self, id: Uuid, favorite: bool) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;
        item.favorite = favorite;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn increment_view_count(&self, id: Uuid) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;
        item.view_count += 1;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        let mut items = self.items.write().await;
        items.remove(&id).ok_or(ItemError::NotFound(id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDraft;

    fn draft(name: &str, room: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            room: room.to_string(),
            ..Default::default()
        }
    }

    async fn seed(repo: &InMemoryItemRepository, draft: ItemDraft) -> Item {
        repo.insert(Item::new(draft, vec![])).await.unwrap()
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_name_and_description() {
        let repo = InMemoryItemRepository::new();
        seed(&repo, draft("Desk Lamp", "study")).await;
        seed(
            &repo,
            ItemDraft {
                description: Some("a small lamp".to_string()),
                ..draft("Reading Light", "bedroom")
            },
        )
        .await;
        seed(&repo, draft("Toaster", "kitchen")).await;

        let hits = repo.search("lamp").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|i| i.name != "Toaster"));
    }

    #[tokio::test]
    async fn test_distinct_rooms_sorted_and_deduplicated() {
        let repo = InMemoryItemRepository::new();
        seed(&repo, draft("Toaster", "kitchen")).await;
        seed(&repo, draft("Kettle", "kitchen")).await;
        seed(&repo, draft("Pillow", "bedroom")).await;

        let rooms = repo.distinct_rooms().await.unwrap();
        assert_eq!(rooms, vec!["bedroom", "kitchen"]);
    }

    #[tokio::test]
    async fn test_distinct_furniture_scoped_and_skips_unset() {
        let repo = InMemoryItemRepository::new();
        seed(
            &repo,
            ItemDraft {
                furniture: Some("wardrobe".to_string()),
                ..draft("Coat", "bedroom")
            },
        )
        .await;
        seed(
            &repo,
            ItemDraft {
                furniture: Some("dresser".to_string()),
                ..draft("Socks", "bedroom")
            },
        )
        .await;
        // No furniture recorded
        seed(&repo, draft("Rug", "bedroom")).await;
        // Other room
        seed(
            &repo,
            ItemDraft {
                furniture: Some("shelf".to_string()),
                ..draft("Pan", "kitchen")
            },
        )
        .await;

        let furniture = repo.distinct_furniture("bedroom").await.unwrap();
        assert_eq!(furniture, vec!["dresser", "wardrobe"]);
    }

    #[tokio::test]
    async fn test_find_by_category() {
        let repo = InMemoryItemRepository::new();
        seed(
            &repo,
            ItemDraft {
                category: Some("electronics".to_string()),
                ..draft("Camera", "study")
            },
        )
        .await;
        seed(&repo, draft("Rug", "bedroom")).await;

        let items = repo.find_by_category("electronics").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Camera");
    }

    #[tokio::test]
    async fn test_find_by_room_and_furniture() {
        let repo = InMemoryItemRepository::new();
        seed(
            &repo,
            ItemDraft {
                furniture: Some("wardrobe".to_string()),
                ..draft("Coat", "bedroom")
            },
        )
        .await;
        seed(
            &repo,
            ItemDraft {
                furniture: Some("dresser".to_string()),
                ..draft("Socks", "bedroom")
            },
        )
        .await;
        seed(
            &repo,
            ItemDraft {
                furniture: Some("wardrobe".to_string()),
                ..draft("Blanket", "guest room")
            },
        )
        .await;

        let items = repo
            .find_by_room_and_furniture("bedroom", "wardrobe")
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Coat");
    }

    #[tokio::test]
    async fn test_find_by_room_ordered_by_recency() {
        let repo = InMemoryItemRepository::new();
        let older = seed(&repo, draft("Coat", "bedroom")).await;
        let newer = seed(&repo, draft("Socks", "bedroom")).await;

        // Touching the older item makes it the most recently updated
        repo.set_favorite(older.id, true).await.unwrap();

        let items = repo.find_by_room("bedroom").await.unwrap();
        assert_eq!(items[0].id, older.id);
        assert_eq!(items[1].id, newer.id);
    }

    #[tokio::test]
    async fn test_top_by_view_count_orders_and_limits() {
        let repo = InMemoryItemRepository::new();
        let mut seeded = Vec::new();
        for n in 0..7 {
            let item = seed(&repo, draft(&format!("item-{}", n), "study")).await;
            for _ in 0..n {
                repo.increment_view_count(item.id).await.unwrap();
            }
            seeded.push(item);
        }

        let top = repo.find_top_by_view_count(5).await.unwrap();
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].view_count, 6);
        assert!(top.windows(2).all(|w| w[0].view_count >= w[1].view_count));
    }

    #[tokio::test]
    async fn test_favorites_listing_follows_flag() {
        let repo = InMemoryItemRepository::new();
        let item = seed(&repo, draft("Camera", "study")).await;

        repo.set_favorite(item.id, true).await.unwrap();
        let favorites = repo.find_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);

        repo.set_favorite(item.id, false).await.unwrap();
        assert!(repo.find_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_missing_item_fails() {
        let repo = InMemoryItemRepository::new();
        let item = Item::new(draft("Ghost", "attic"), vec![]);

        let result = repo.replace(item).await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let repo = InMemoryItemRepository::new();
        let keep = seed(&repo, draft("Keep", "study")).await;
        let gone = seed(&repo, draft("Gone", "study")).await;

        repo.delete(gone.id).await.unwrap();

        assert!(repo.find_by_id(gone.id).await.unwrap().is_none());
        assert!(repo.find_by_id(keep.id).await.unwrap().is_some());
        assert!(matches!(
            repo.delete(gone.id).await,
            Err(ItemError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_increment_refreshes_updated_at() {
        let repo = InMemoryItemRepository::new();
        let item = seed(&repo, draft("Camera", "study")).await;

        let updated = repo.increment_view_count(item.id).await.unwrap();
        assert_eq!(updated.view_count, 1);
        assert!(updated.updated_at >= item.updated_at);
        assert_eq!(updated.created_at, item.created_at);
    }
}
