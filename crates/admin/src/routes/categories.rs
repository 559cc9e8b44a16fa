//! Category route handlers.
//!
//! `GET /categories` renders the page for browsers and returns the page
//! payload for JSON callers. Mutations answer with JSON, except a delete from
//! a non-JSON caller, which redirects back with a flash message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::ACCEPT},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use catalog_core::{
    ActiveCategory, CategoriesPage, Category, CategoryId, CategoryResponse, Flash, FlashKind,
    MessageResponse,
};

use crate::{
    error::AppError,
    middleware::{session_token, set_flash, take_flash},
    models::RawCategoryInput,
    services::categories::{CategoryError, outcome},
    state::AppState,
};

/// Path of the category page.
pub const CATEGORIES_PATH: &str = "/categories";

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(CATEGORIES_PATH, get(index).post(store))
        .route("/categories/active", get(active))
        .route("/categories/{id}", axum::routing::put(update).delete(destroy))
}

/// Category id from the path. Values outside the id range name no category.
fn category_id(raw: i64) -> Result<CategoryId, AppError> {
    i32::try_from(raw)
        .map(CategoryId::new)
        .map_err(|_| AppError::NotFound(format!("category {raw}")))
}

/// Whether the caller asked for a JSON response.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

// =============================================================================
// Views
// =============================================================================

/// Table row view for templates.
#[derive(Debug, Clone)]
pub struct CategoryRowView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub products_count: i64,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub deletable: bool,
}

impl From<&Category> for CategoryRowView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.as_i32(),
            name: category.name.to_string(),
            slug: category.slug.to_string(),
            description: category.display_description().to_string(),
            products_count: category.products_count,
            status_label: category.status_label(),
            status_class: category.status_class(),
            deletable: category.is_deletable(),
        }
    }
}

/// Flash message view for templates.
#[derive(Debug, Clone)]
pub struct FlashView {
    pub class: &'static str,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            class: match flash.kind {
                FlashKind::Success => "flash flash-success",
                FlashKind::Error => "flash flash-error",
            },
            message: flash.message,
        }
    }
}

/// Categories page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub current_path: String,
    pub csrf_token: String,
    pub flash: Option<FlashView>,
    pub categories: Vec<CategoryRowView>,
    /// Initial list for the client, safe to embed in a `<script>` element.
    pub initial_json: String,
}

/// Serialize for embedding inside a `<script type="application/json">` element.
fn embed_json(categories: &[Category]) -> Result<String, AppError> {
    let json = serde_json::to_string(categories)
        .map_err(|e| AppError::Internal(format!("failed to serialize categories: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Category list page.
///
/// # Errors
///
/// Returns an error if the store or the session fails.
#[instrument(skip(state, session, headers))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let categories = state.categories().list().await?;
    let csrf_token = session_token(&session).await?;
    let flash = take_flash(&session).await?;

    if wants_json(&headers) {
        return Ok(Json(CategoriesPage {
            categories,
            csrf_token,
            flash,
        })
        .into_response());
    }

    let initial_json = embed_json(&categories)?;
    Ok(CategoriesIndexTemplate {
        current_path: CATEGORIES_PATH.to_string(),
        csrf_token,
        flash: flash.map(FlashView::from),
        categories: categories.iter().map(CategoryRowView::from).collect(),
        initial_json,
    }
    .into_response())
}

/// Create a category.
///
/// # Errors
///
/// Returns 422 with field errors if validation fails.
#[instrument(skip(state, payload))]
pub async fn store(
    State(state): State<AppState>,
    payload: Result<Json<RawCategoryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let Json(input) = payload?;
    let category = state.categories().create(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            message: outcome::CREATED.to_string(),
            category,
        }),
    ))
}

/// Update a category.
///
/// # Errors
///
/// Returns 422 with field errors if validation fails, 404 if the category
/// does not exist.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<RawCategoryInput>, JsonRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id = category_id(id)?;
    let Json(input) = payload?;
    let category = state.categories().update(id, &input).await?;

    Ok(Json(CategoryResponse {
        message: outcome::UPDATED.to_string(),
        category,
    }))
}

/// Delete a category.
///
/// JSON callers get `200`/`409`/`404` with a message body. Other callers are
/// redirected to the page with a success or error flash; an unknown ID is
/// still a 404.
///
/// # Errors
///
/// Returns 404 if the category does not exist.
#[instrument(skip(state, session, headers))]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let result = state.categories().delete(category_id(id)?).await;

    if wants_json(&headers) {
        result?;
        return Ok(Json(MessageResponse {
            message: outcome::DELETED.to_string(),
        })
        .into_response());
    }

    let flash = match result {
        Ok(()) => Flash::success(outcome::DELETED),
        Err(CategoryError::HasProducts { .. }) => Flash::error(outcome::HAS_PRODUCTS),
        Err(e) => return Err(e.into()),
    };
    set_flash(&session, &flash).await?;

    Ok(Redirect::to(CATEGORIES_PATH).into_response())
}

/// Active categories for select widgets.
///
/// # Errors
///
/// Returns an error if the store fails.
#[instrument(skip(state))]
pub async fn active(State(state): State<AppState>) -> Result<Json<Vec<ActiveCategory>>, AppError> {
    Ok(Json(state.categories().list_active().await?))
}
