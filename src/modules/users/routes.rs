//! Signup and login handlers. These are the only unauthenticated routes.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use stacks_auth::{password, TokenService};
use stacks_http::error::AppError;
use stacks_kernel::InitCtx;

use super::{repository::UserRepo, schema};

#[derive(Clone)]
pub struct UsersState {
    pub users: UserRepo,
    pub tokens: TokenService,
}

impl FromRef<UsersState> for TokenService {
    fn from_ref(state: &UsersState) -> TokenService {
        state.tokens.clone()
    }
}

pub fn router(ctx: &InitCtx<'_>) -> Router {
    let state = UsersState {
        users: UserRepo::new(ctx.db.clone()),
        tokens: ctx.tokens.clone(),
    };

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(state)
}

async fn signup(
    State(state): State<UsersState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = schema::validate_user(&payload)
        .map_err(|violations| AppError::validation(violations.into_field_errors()))?;

    // Best-effort check; the UNIQUE constraint settles concurrent signups.
    if state.users.find_by_username(&data.username).await?.is_some() {
        return Err(AppError::conflict("Username already exists."));
    }

    let hashed = password::hash(&data.password)?;
    state.users.insert(&data.username, &hashed).await?;

    tracing::info!(username = %data.username, "user created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

async fn login(
    State(state): State<UsersState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = schema::validate_user(&payload)
        .map_err(|violations| AppError::validation(violations.into_field_errors()))?;

    // One failure path for absent users and bad passwords, so responses do
    // not leak which usernames exist.
    let user = state.users.find_by_username(&data.username).await?;
    let verified = user
        .map(|user| password::verify(&data.password, &user.password))
        .unwrap_or(false);

    if !verified {
        return Err(AppError::unauthorized("Bad username or password"));
    }

    let access_token = state.tokens.issue(&data.username)?;
    Ok(Json(json!({ "access_token": access_token })))
}
