use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemDraft, Stats, split_tags};
use crate::repository::ItemRepository;
use crate::service::InventoryService;
use crate::storage::{AttachmentStore, AttachmentUpload};

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        get_item,
        update_item,
        delete_item,
        get_items_by_room,
        search_items,
        get_rooms,
        get_furniture_by_room,
        get_favorite_items,
        get_popular_items,
        toggle_favorite,
        increment_view_count,
        get_stats,
    ),
    components(
        schemas(Item, ItemForm, Stats),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Household item catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Multipart form payload for creating or updating an item
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ItemForm {
    /// Item name (required)
    name: String,
    /// Optional description, at most 1000 characters
    description: Option<String>,
    /// Room the item is stored in (required)
    room: String,
    furniture: Option<String>,
    location: Option<String>,
    category: Option<String>,
    /// Comma-separated labels
    tags: Option<String>,
    /// Zero or more image files
    #[schema(value_type = Vec<String>, format = Binary)]
    images: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring to match against name and description
    pub keyword: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FavoriteQuery {
    /// New favorite state
    pub favorite: bool,
}

/// Create the items router with all HTTP endpoints
pub fn router<R, S>(service: InventoryService<R, S>) -> Router
where
    R: ItemRepository + 'static,
    S: AttachmentStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/rooms", get(get_rooms))
        .route("/rooms/{room}/furniture", get(get_furniture_by_room))
        .route("/room/{room}", get(get_items_by_room))
        .route("/favorites", get(get_favorite_items))
        .route("/popular", get(get_popular_items))
        .route("/stats", get(get_stats))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/{id}/favorite", post(toggle_favorite))
        .route("/{id}/view", post(increment_view_count))
        .with_state(shared_service)
}

/// Parse the multipart item form into a draft plus pending uploads
async fn parse_item_form(
    mut multipart: Multipart,
) -> ItemResult<(ItemDraft, Vec<AttachmentUpload>)> {
    let mut draft = ItemDraft::default();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ItemError::Validation(format!("invalid multipart payload: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "images" {
            let filename = field.file_name().unwrap_or("attachment").to_owned();
            let content = field
                .bytes()
                .await
                .map_err(|e| ItemError::Validation(format!("invalid file upload: {}", e)))?;
            // Browsers submit an empty part when no file is selected
            if !content.is_empty() {
                uploads.push(AttachmentUpload {
                    filename,
                    content: content.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ItemError::Validation(format!("invalid field '{}': {}", name, e)))?;

        match name.as_str() {
            "name" => draft.name = value,
            "description" => draft.description = non_empty(value),
            "room" => draft.room = value,
            "furniture" => draft.furniture = non_empty(value),
            "location" => draft.location = non_empty(value),
            "category" => draft.category = non_empty(value),
            "tags" => draft.tags = split_tags(&value),
            _ => {}
        }
    }

    Ok((draft, uploads))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "All items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.get_all_items().await?;
    Ok(Json(items))
}

/// Create a new item with optional image uploads
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body(content = ItemForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    multipart: Multipart,
) -> ItemResult<impl IntoResponse> {
    let (draft, uploads) = parse_item_form(multipart).await?;
    let item = service.create_item(draft, uploads).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Update an item, optionally replacing its images
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body(content = ItemForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    UuidPath(id): UuidPath,
    multipart: Multipart,
) -> ItemResult<Json<Item>> {
    let (draft, uploads) = parse_item_form(multipart).await?;
    let item = service.update_item(id, draft, uploads).await?;
    Ok(Json(item))
}

/// Delete an item (stored image blobs are left in place)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<impl IntoResponse> {
    service.delete_item(id).await?;
    Ok(StatusCode::OK)
}

/// List items stored in a room
#[utoipa::path(
    get,
    path = "/room/{room}",
    tag = "Items",
    params(
        ("room" = String, Path, description = "Room name")
    ),
    responses(
        (status = 200, description = "Items in the room", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_items_by_room<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    Path(room): Path<String>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.get_items_by_room(&room).await?;
    Ok(Json(items))
}

/// Search items by keyword in name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = "Items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    Query(query): Query<SearchQuery>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.search_items(&query.keyword).await?;
    Ok(Json(items))
}

/// List distinct room names
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "Items",
    responses(
        (status = 200, description = "Distinct room names, sorted", body = Vec<String>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_rooms<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
) -> ItemResult<Json<Vec<String>>> {
    let rooms = service.get_all_rooms().await?;
    Ok(Json(rooms))
}

/// List distinct furniture names within a room
#[utoipa::path(
    get,
    path = "/rooms/{room}/furniture",
    tag = "Items",
    params(
        ("room" = String, Path, description = "Room name")
    ),
    responses(
        (status = 200, description = "Distinct furniture names, sorted", body = Vec<String>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_furniture_by_room<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    Path(room): Path<String>,
) -> ItemResult<Json<Vec<String>>> {
    let furniture = service.get_furniture_by_room(&room).await?;
    Ok(Json(furniture))
}

/// List favorited items
#[utoipa::path(
    get,
    path = "/favorites",
    tag = "Items",
    responses(
        (status = 200, description = "Favorited items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_favorite_items<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.get_favorite_items().await?;
    Ok(Json(items))
}

/// List the most viewed items
#[utoipa::path(
    get,
    path = "/popular",
    tag = "Items",
    responses(
        (status = 200, description = "Top items by view count", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_popular_items<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.get_popular_items().await?;
    Ok(Json(items))
}

/// Set or clear the favorite flag
#[utoipa::path(
    post,
    path = "/{id}/favorite",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        FavoriteQuery
    ),
    responses(
        (status = 200, description = "Favorite flag updated", body = Item),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_favorite<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    UuidPath(id): UuidPath,
    Query(query): Query<FavoriteQuery>,
) -> ItemResult<Json<Item>> {
    let item = service.toggle_favorite(id, query.favorite).await?;
    Ok(Json(item))
}

/// Record one view of the item
#[utoipa::path(
    post,
    path = "/{id}/view",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "View recorded"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn increment_view_count<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
    UuidPath(id): UuidPath,
) -> ItemResult<impl IntoResponse> {
    service.increment_view_count(id).await?;
    Ok(StatusCode::OK)
}

/// Catalog statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Items",
    responses(
        (status = 200, description = "Total item count and room names", body = Stats),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_stats<R: ItemRepository, S: AttachmentStore>(
    State(service): State<Arc<InventoryService<R, S>>>,
) -> ItemResult<Json<Stats>> {
    let stats = service.get_stats().await?;
    Ok(Json(stats))
}
