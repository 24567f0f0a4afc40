//! HTTP handlers for book resources.

use anyhow::Context;
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

use super::{repository::BookRepo, schema};
use crate::modules::authors::repository::AuthorRepo;
use crate::pagination::ListParams;

#[derive(Clone)]
pub struct BooksState {
    pub books: BookRepo,
    pub authors: AuthorRepo,
    pub tokens: TokenService,
}

impl FromRef<BooksState> for TokenService {
    fn from_ref(state: &BooksState) -> TokenService {
        state.tokens.clone()
    }
}

pub fn router(ctx: &InitCtx<'_>) -> Router {
    let state = BooksState {
        books: BookRepo::new(ctx.db.clone()),
        authors: AuthorRepo::new(ctx.db.clone()),
        tokens: ctx.tokens.clone(),
    };

    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(state)
}

async fn list_books(
    _user: AuthUser,
    State(state): State<BooksState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list(params.window()).await?;
    Ok(Json(books))
}

async fn create_book(
    _user: AuthUser,
    State(state): State<BooksState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = schema::validate_book(&payload, &state.authors)
        .await?
        .map_err(|violations| AppError::validation(violations.into_field_errors()))?;

    let book = state.books.insert(&data).await?;
    let detail = state
        .books
        .detail(book.id)
        .await?
        .context("created book row is missing")?;

    Ok((StatusCode::CREATED, Json(detail)))
}

async fn get_book(
    _user: AuthUser,
    State(state): State<BooksState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .books
        .detail(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;
    Ok(Json(detail))
}

async fn update_book(
    _user: AuthUser,
    State(state): State<BooksState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut book = state
        .books
        .get(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;

    let data = schema::validate_book(&payload, &state.authors)
        .await?
        .map_err(|violations| AppError::validation(violations.into_field_errors()))?;

    data.apply_to(&mut book);
    state.books.update(&book).await?;

    let detail = state
        .books
        .detail(book.id)
        .await?
        .context("updated book row is missing")?;

    Ok((StatusCode::CREATED, Json(detail)))
}

async fn delete_book(
    _user: AuthUser,
    State(state): State<BooksState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .books
        .get(id)
        .await?
        .ok_or_else(|| AppError::entity_not_found(id))?;

    state.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
