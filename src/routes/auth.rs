use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ERR_DUPLICATE_USER, ERR_MISSING_LOGIN_FIELDS, ERR_MISSING_REGISTER_FIELDS,
    ERR_PASSWORD_TOO_SHORT, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, Result};
use crate::models::{PublicUser, User};
use crate::security::{generate_token, hash_password, verify_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
    pub token: String,
}

/// Register a new user
///
/// Usernames and emails are unique case-insensitively; emails are stored
/// lower-cased. The password is hashed with the service's placeholder
/// unsalted digest. Returns 409 Conflict on a duplicate.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let (username, email, password) = match (
        payload.username.as_deref().filter(|s| !s.trim().is_empty()),
        payload.email.as_deref().filter(|s| !s.trim().is_empty()),
        payload.password.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        _ => {
            return Err(AppError::InvalidInput(
                ERR_MISSING_REGISTER_FIELDS.to_string(),
            ))
        }
    };

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(ERR_PASSWORD_TOO_SHORT.to_string()));
    }

    if state.store.user_exists(username, email).await? {
        return Err(AppError::Conflict(ERR_DUPLICATE_USER.to_string()));
    }

    let now = Utc::now();
    let user_id = format!("user-{}", now.timestamp_millis());
    let user = User {
        id: user_id.clone(),
        username: username.to_string(),
        display_name: username.to_string(),
        email: email.to_lowercase(),
        password_hash: hash_password(password),
        created_at: now,
        // Partition key, equal to id
        user_id,
    };

    let public = PublicUser::from(&user);
    state.store.create_user(user).await?;

    tracing::info!("New user registered: {}", public.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user: public,
        }),
    ))
}

/// Authenticate by email and password
///
/// Returns the user (without the hash) and an opaque session token. The
/// token is not validated by any other endpoint; auth here is a placeholder.
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (email, password) = match (
        payload.email.as_deref().filter(|s| !s.trim().is_empty()),
        payload.password.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(AppError::InvalidInput(ERR_MISSING_LOGIN_FIELDS.to_string())),
    };

    let user = state
        .store
        .find_user_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: PublicUser::from(&user),
        token: generate_token(),
    }))
}
