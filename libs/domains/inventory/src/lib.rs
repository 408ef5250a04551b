//! Inventory Domain
//!
//! This module provides a complete domain implementation for cataloging
//! household items and where they are stored (room → furniture → precise
//! location), with image attachments, search, favorites, and view-count
//! popularity tracking.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart uploads, queries)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, attachment policy
//! └──────┬──────┘
//!        │
//! ┌──────▼───────────────┐
//! │ Repository / Storage │  ← Item persistence (trait + MongoDB and
//! └──────┬───────────────┘    in-memory impls) and blob storage (trait +
//!        │                    filesystem impl)
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     handlers,
//!     mongodb::MongoItemRepository,
//!     service::InventoryService,
//!     storage::FsAttachmentStore,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("inventory");
//!
//! let repository = MongoItemRepository::new(db);
//! let attachments = FsAttachmentStore::new("uploads", "/uploads");
//! let service = InventoryService::new(repository, attachments);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryItemRepository;
pub use models::{Item, ItemDraft, Stats};
pub use mongodb::MongoItemRepository;
pub use repository::ItemRepository;
pub use service::InventoryService;
pub use storage::{AttachmentStore, AttachmentUpload, FsAttachmentStore};
