//! HTTP handlers for author resources.

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use stacks_auth::{AuthUser, TokenService};
use stacks_http::error::AppError;
use stacks_kernel::InitCtx;

use super::{repository::AuthorRepo, schema};
use crate::modules::books::repository::BookRepo;
use crate::pagination::ListParams;

#[derive(Clone)]
pub struct AuthorsState {
    pub authors: AuthorRepo,
    pub books: BookRepo,
    pub tokens: TokenService,
}

impl FromRef<AuthorsState> for TokenService {
    fn from_ref(state: &AuthorsState) -> TokenService {
        state.tokens.clone()
    }
}

pub fn router(ctx: &InitCtx<'_>) -> Router {
    let state = AuthorsState {
        authors: AuthorRepo::new(ctx.db.clone()),
        books: BookRepo::new(ctx.db.clone()),
        tokens: ctx.tokens.clone(),
    };

    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
        .route("/authors/{id}/books", get(list_author_books))
        .with_state(state)
}

async fn list_authors(
    _user: AuthUser,
    State(state): State<AuthorsState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let authors = state.authors.list(params.window()).await?;
    Ok(Json(authors))
}

async fn create_author(
    _user: AuthUser,
    State(state): State<AuthorsState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = schema::validate_author(&payload)
        .map_err(|violations| AppError::validation(violations.into_field_errors()))?;

    let author = state.authors.insert(&data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn get_author(
    _user: AuthUser,
    State(state): State<AuthorsState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let author = state
        .authors
        .get(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;
    Ok(Json(author))
}

async fn update_author(
    _user: AuthUser,
    State(state): State<AuthorsState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut author = state
        .authors
        .get(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;

    let data = schema::validate_author(&payload)
        .map_err(|violations| AppError::validation(violations.into_field_errors()))?;

    data.apply_to(&mut author);
    state.authors.update(&author).await?;

    Ok((StatusCode::CREATED, Json(author)))
}

async fn delete_author(
    _user: AuthUser,
    State(state): State<AuthorsState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .authors
        .get(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;

    state.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_author_books(
    _user: AuthUser,
    State(state): State<AuthorsState>,
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let author = state
        .authors
        .get(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;

    let books = state
        .books
        .list_by_author(author.id, params.window())
        .await?;
    Ok(Json(books))
}
