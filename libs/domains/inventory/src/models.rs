use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Item entity - a tracked physical object with a recorded storage location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned on creation and immutable afterwards
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Optional description, at most 1000 characters
    pub description: Option<String>,
    /// Top-level location grouping (e.g. "living room")
    pub room: String,
    /// Sub-location within the room (e.g. "wardrobe")
    pub furniture: Option<String>,
    /// Precise placement within the furniture (e.g. "top drawer")
    pub location: Option<String>,
    /// Free-text classification (e.g. "electronics")
    pub category: Option<String>,
    /// Short labels; duplicates allowed, order preserved
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attachment references under the public upload prefix
    #[serde(default)]
    pub images: Vec<String>,
    /// Marks the item for prioritized display
    #[serde(default)]
    pub favorite: bool,
    /// Cumulative view counter, only ever incremented
    #[serde(default)]
    pub view_count: i64,
    /// Creation timestamp, never modified
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation
    pub updated_at: DateTime<Utc>,
}

/// The caller-editable fields of an item.
///
/// Applying a draft replaces every editable field wholesale; `favorite`,
/// `view_count` and the timestamps are never taken from a draft.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ItemDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub room: String,
    pub furniture: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Catalog statistics
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total number of cataloged items
    pub total_items: u64,
    /// Distinct room names, sorted
    pub rooms: Vec<String>,
}

impl Item {
    /// Create a new item from a draft and already-stored attachment references
    pub fn new(draft: ItemDraft, images: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: draft.name,
            description: draft.description,
            room: draft.room,
            furniture: draft.furniture,
            location: draft.location,
            category: draft.category,
            tags: draft.tags,
            images,
            favorite: false,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all editable fields from the draft and refresh `updated_at`.
    ///
    /// This is a full replace, not a merge: fields absent from the draft
    /// become empty. `images` is replaced only when `Some` (no new uploads
    /// leave the existing references untouched). `favorite`, `view_count`
    /// and `created_at` are preserved.
    pub fn apply_draft(&mut self, draft: ItemDraft, images: Option<Vec<String>>) {
        self.name = draft.name;
        self.description = draft.description;
        self.room = draft.room;
        self.furniture = draft.furniture;
        self.location = draft.location;
        self.category = draft.category;
        self.tags = draft.tags;
        if let Some(images) = images {
            self.images = images;
        }
        self.updated_at = Utc::now();
    }
}

/// Split a comma-separated tag field into labels.
///
/// Segments are trimmed; empty segments are dropped. Duplicates and order
/// are preserved.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, room: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            room: room.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new(draft("Desk Lamp", "study"), vec![]);
        assert_eq!(item.name, "Desk Lamp");
        assert_eq!(item.room, "study");
        assert!(!item.favorite);
        assert_eq!(item.view_count, 0);
        assert!(item.images.is_empty());
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_apply_draft_is_full_replace() {
        let mut item = Item::new(
            ItemDraft {
                name: "Passport".to_string(),
                room: "bedroom".to_string(),
                furniture: Some("dresser".to_string()),
                location: Some("top drawer".to_string()),
                category: Some("documents".to_string()),
                tags: vec!["important".to_string()],
                ..Default::default()
            },
            vec!["/uploads/a_passport.jpg".to_string()],
        );

        item.apply_draft(draft("Passport", "office"), None);

        // Fields absent from the draft become empty
        assert_eq!(item.room, "office");
        assert_eq!(item.furniture, None);
        assert_eq!(item.location, None);
        assert_eq!(item.category, None);
        assert!(item.tags.is_empty());
        // No new uploads: images untouched
        assert_eq!(item.images, vec!["/uploads/a_passport.jpg".to_string()]);
    }

    #[test]
    fn test_apply_draft_replaces_images_when_present() {
        let mut item = Item::new(draft("Camera", "study"), vec!["/uploads/old.jpg".to_string()]);

        item.apply_draft(
            draft("Camera", "study"),
            Some(vec!["/uploads/new.jpg".to_string()]),
        );

        assert_eq!(item.images, vec!["/uploads/new.jpg".to_string()]);
    }

    #[test]
    fn test_apply_draft_preserves_counters_and_creation_time() {
        let mut item = Item::new(draft("Camera", "study"), vec![]);
        item.favorite = true;
        item.view_count = 7;
        let created = item.created_at;

        item.apply_draft(draft("Camera mk2", "study"), None);

        assert!(item.favorite);
        assert_eq!(item.view_count, 7);
        assert_eq!(item.created_at, created);
        assert!(item.created_at <= item.updated_at);
    }

    #[test]
    fn test_draft_validation() {
        use validator::Validate;

        assert!(draft("Desk Lamp", "study").validate().is_ok());
        assert!(draft("", "study").validate().is_err());
        assert!(draft("Desk Lamp", "").validate().is_err());

        let long_description = ItemDraft {
            description: Some("x".repeat(1001)),
            ..draft("Desk Lamp", "study")
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("a,b , c"), vec!["a", "b", "c"]);
        assert_eq!(split_tags("a,,b"), vec!["a", "b"]);
        assert_eq!(split_tags(""), Vec::<String>::new());
        // Duplicates are not rejected
        assert_eq!(split_tags("a,a"), vec!["a", "a"]);
    }

    #[test]
    fn test_item_json_field_names() {
        let item = Item::new(draft("Desk Lamp", "study"), vec![]);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("viewCount").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("id").is_some());
    }
}
