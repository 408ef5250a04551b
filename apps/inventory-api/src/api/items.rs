//! Items API routes
//!
//! This module wires up the inventory domain to HTTP routes.

use axum::Router;
use domain_inventory::{FsAttachmentStore, InventoryService, MongoItemRepository, handlers};

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoItemRepository::new(state.db.clone());

    // Create the filesystem attachment store
    let attachments = FsAttachmentStore::new(
        &state.config.storage.root,
        state.config.storage.public_prefix.clone(),
    );

    // Create the service
    let service = InventoryService::new(repository, attachments);

    // Return the domain's router
    handlers::router(service)
}
