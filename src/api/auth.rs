//! Authentication: registration, login with account lockout, cookie-backed
//! sessions, profile management.
//!
//! Login order of checks: user lookup, lock check, active check, password
//! verify. The lock check always runs before the credential check. Sessions
//! are server-side rows keyed by the SHA-256 hash of a random token; the
//! raw token only ever lives in the `sid` cookie.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::{
    LoginRequest, LoginResponse, RegisterRequest, Session, UpdateProfileRequest, User,
    UserResponse,
};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::lockout::LockoutPolicy;
use super::validation::{
    validate_email, validate_full_name, validate_password, validate_username,
};

/// Session token cookie
pub const SESSION_COOKIE: &str = "sid";
/// Client-readable last-login timestamp (demo affordance)
pub const LAST_LOGIN_COOKIE: &str = "last_login";
/// Serialized preference object (demo affordance)
pub const PREFERENCE_COOKIE: &str = "user_preference";
/// Pending post-login redirect target
pub const RETURN_TO_COOKIE: &str = "return_to";

/// Where a successful login lands when no return-to target is pending
const DEFAULT_LANDING: &str = "/dashboard";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a random session token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// A cookie that clears its namesake on the client
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::from(name);
    cookie.set_path("/");
    cookie
}

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_username(&req.username) {
        errors.add("username", e);
    }
    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_full_name(&req.full_name) {
        errors.add("full_name", e);
    }
    if let Err(e) = validate_password(&req.password, state.config.auth.min_password_length) {
        errors.add("password", e);
    }
    if req.password != req.confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }
    errors.finish()?;

    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = ? OR email = ?")
            .bind(&req.username)
            .bind(&req.email)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("Username or email already exists"));
    }

    let id = uuid::Uuid::new_v4().to_string();
    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, full_name, role,
                            is_active, login_attempts, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, 'user', 1, 0, ?, ?)",
    )
    .bind(&id)
    .bind(&req.username)
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.full_name)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    tracing::info!(username = %req.username, "User registered");

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login endpoint. Establishes a session and sets the auxiliary demo
/// cookies; the response carries the resolved post-login redirect target.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    if req.identifier.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation_field(
            "identifier",
            "Username/email and password are required",
        ));
    }

    let user: Option<User> =
        sqlx::query_as("SELECT * FROM users WHERE username = ? OR email = ?")
            .bind(&req.identifier)
            .bind(&req.identifier)
            .fetch_optional(&state.db)
            .await?;
    let mut user = user.ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let policy = LockoutPolicy::from_config(&state.config.auth);
    let now = Utc::now();

    // Lock check precedes the credential check, even for correct passwords
    if policy.is_locked(user.lock_until.as_deref(), now) {
        return Err(ApiError::locked_account());
    }

    if !user.is_active {
        return Err(ApiError::inactive_account());
    }

    if !verify_password(&req.password, &user.password_hash) {
        let outcome = policy.register_failure(user.login_attempts, user.lock_until.as_deref(), now);

        // Persist immediately so concurrent attempts see accumulated failures
        sqlx::query(
            "UPDATE users SET login_attempts = ?, lock_until = ?, updated_at = ? WHERE id = ?",
        )
        .bind(outcome.attempts)
        .bind(&outcome.lock_until)
        .bind(now.to_rfc3339())
        .bind(&user.id)
        .execute(&state.db)
        .await?;

        if outcome.lock_until.is_some() {
            tracing::warn!(
                username = %user.username,
                attempts = outcome.attempts,
                "Account locked after repeated failed logins"
            );
        }
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    // Successful authentication: reset the counter, clear any stale lock,
    // stamp the last login
    let now_str = now.to_rfc3339();
    sqlx::query(
        "UPDATE users SET login_attempts = 0, lock_until = NULL, last_login = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&now_str)
    .bind(&now_str)
    .bind(&user.id)
    .execute(&state.db)
    .await?;
    user.login_attempts = 0;
    user.lock_until = None;
    user.last_login = Some(now_str.clone());

    // Opportunistic purge of this user's expired sessions
    sqlx::query("DELETE FROM sessions WHERE user_id = ? AND expires_at <= ?")
        .bind(&user.id)
        .bind(&now_str)
        .execute(&state.db)
        .await?;

    let ttl_secs = if req.remember_me {
        state.config.auth.remember_me_ttl_secs
    } else {
        state.config.auth.session_ttl_secs
    };
    let expires_at = (now + chrono::Duration::seconds(ttl_secs as i64)).to_rfc3339();

    let token = generate_token();
    let session_id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO sessions (id, user_id, token_hash, username, email, full_name, role,
                               login_time, data, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, '{}', ?, ?)",
    )
    .bind(&session_id)
    .bind(&user.id)
    .bind(hash_token(&token))
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(&user.role)
    .bind(&now_str)
    .bind(&expires_at)
    .bind(&now_str)
    .execute(&state.db)
    .await?;

    // Resolve the post-login redirect target and consume it
    let redirect_to = jar
        .get(RETURN_TO_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|path| path.starts_with('/'))
        .unwrap_or_else(|| DEFAULT_LANDING.to_string());

    let session_cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(ttl_secs as i64))
        .build();
    let last_login_cookie = Cookie::build((LAST_LOGIN_COOKIE, now_str.clone()))
        .path("/")
        .max_age(time::Duration::days(30))
        .build();
    let preference = serde_json::json!({
        "theme": "default",
        "language": "en",
        "timezone": "UTC",
    });
    let preference_cookie = Cookie::build((PREFERENCE_COOKIE, preference.to_string()))
        .path("/")
        .max_age(time::Duration::days(365))
        .build();

    let jar = jar
        .add(session_cookie)
        .add(last_login_cookie)
        .add(preference_cookie)
        .remove(removal_cookie(RETURN_TO_COOKIE));

    tracing::info!(username = %user.username, remember_me = req.remember_me, "User logged in");

    Ok((
        jar,
        Json(LoginResponse {
            user: user.into(),
            redirect_to,
        }),
    ))
}

/// Logout endpoint. Destroys the session row and clears every cookie the
/// login set, so no residual state permits re-entry.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(hash_token(cookie.value()))
            .execute(&state.db)
            .await?;
    }

    let jar = jar
        .remove(removal_cookie(SESSION_COOKIE))
        .remove(removal_cookie(LAST_LOGIN_COOKIE))
        .remove(removal_cookie(PREFERENCE_COOKIE))
        .remove(removal_cookie(RETURN_TO_COOKIE));

    Ok((
        jar,
        Json(serde_json::json!({
            "message": "You have been logged out successfully",
            "redirect_to": "/auth/login",
        })),
    ))
}

/// Get the authenticated user's profile
pub async fn get_profile(user: User) -> Json<UserResponse> {
    Json(user.into())
}

/// Update the authenticated user's full name and email. Email must stay
/// globally unique; the session snapshots follow the user row.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_full_name(&req.full_name) {
        errors.add("full_name", e);
    }
    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }
    errors.finish()?;

    let taken: Option<(String,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = ? AND id != ?")
            .bind(&req.email)
            .bind(&user.id)
            .fetch_optional(&state.db)
            .await?;
    if taken.is_some() {
        return Err(ApiError::conflict("Email is already taken by another user"));
    }

    let now = Utc::now().to_rfc3339();
    sqlx::query("UPDATE users SET full_name = ?, email = ?, updated_at = ? WHERE id = ?")
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(&now)
        .bind(&user.id)
        .execute(&state.db)
        .await?;

    // Keep session snapshots consistent with the user row
    sqlx::query("UPDATE sessions SET full_name = ?, email = ? WHERE user_id = ?")
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(&user.id)
        .execute(&state.db)
        .await?;

    let updated = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&user.id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(updated.into()))
}

/// Look up the live session behind the request's `sid` cookie
async fn session_for_jar(state: &AppState, jar: &CookieJar) -> Result<Session, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::unauthorized("Please log in to access this page"))?;

    let session: Option<Session> =
        sqlx::query_as("SELECT * FROM sessions WHERE token_hash = ? AND expires_at > ?")
            .bind(hash_token(&token))
            .bind(Utc::now().to_rfc3339())
            .fetch_optional(&state.db)
            .await?;

    session.ok_or_else(|| ApiError::unauthorized("Session expired or invalid"))
}

/// Auth middleware guarding the protected route groups. A rejected request
/// gets a short-lived return-to cookie recording the path it asked for, so
/// the next successful login can send the client back there.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    match session_for_jar(&state, &jar).await {
        Ok(_) => Ok(next.run(request).await),
        Err(err) => {
            let mut return_to = Cookie::new(RETURN_TO_COOKIE, request.uri().path().to_string());
            return_to.set_path("/");
            return_to.set_max_age(time::Duration::minutes(10));
            Err((jar.add(return_to), err).into_response())
        }
    }
}

/// Extractor for the current session record
#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unauthorized("Please log in to access this page"))?;
        session_for_jar(state, &jar).await
    }
}

/// Extractor for the current authenticated user
#[async_trait]
impl FromRequestParts<Arc<AppState>> for User {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&session.user_id)
            .fetch_optional(&state.db)
            .await?;

        user.ok_or_else(|| ApiError::unauthorized("Session expired or invalid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorCode;
    use crate::config::Config;
    use axum::http::{header, HeaderMap, HeaderValue};

    async fn test_state() -> Arc<AppState> {
        let pool = crate::db::test_pool().await;
        Arc::new(AppState::new(Config::default(), pool))
    }

    fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            full_name: "Alice Example".to_string(),
        }
    }

    fn login_request(identifier: &str, password: &str, remember_me: bool) -> LoginRequest {
        LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
            remember_me,
        }
    }

    fn empty_jar() -> CookieJar {
        CookieJar::from_headers(&HeaderMap::new())
    }

    fn jar_with_cookie(name: &str, value: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", name, value)).unwrap(),
        );
        CookieJar::from_headers(&headers)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = test_state().await;

        let (status, user) = register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.role, "user");

        let (jar, response) = login(
            State(state.clone()),
            empty_jar(),
            Json(login_request("alice", "secret1", false)),
        )
        .await
        .unwrap();

        assert_eq!(response.user.username, "alice");
        assert_eq!(response.redirect_to, "/dashboard");
        assert!(jar.get(SESSION_COOKIE).is_some());
        assert!(jar.get(LAST_LOGIN_COOKIE).is_some());
        assert!(jar.get(PREFERENCE_COOKIE).is_some());

        // Login by email works too
        let result = login(
            State(state),
            empty_jar(),
            Json(login_request("alice@x.com", "secret1", false)),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejects_weak_or_mismatched_password() {
        let state = test_state().await;

        let mut req = register_request("bob", "bob@x.com", "12345");
        let err = register(State(state.clone()), Json(req)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        req = register_request("bob", "bob@x.com", "secret1");
        req.confirm_password = "different".to_string();
        let err = register(State(state.clone()), Json(req)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        // Neither attempt created a user
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let state = test_state().await;

        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();

        let err = register(
            State(state.clone()),
            Json(register_request("alice", "other@x.com", "secret1")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);

        let err = register(
            State(state),
            Json(register_request("alice2", "alice@x.com", "secret1")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_lockout_after_repeated_failures() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();

        // Five consecutive wrong passwords
        for _ in 0..5 {
            let err = login(
                State(state.clone()),
                empty_jar(),
                Json(login_request("alice", "wrong", false)),
            )
            .await
            .unwrap_err();
            assert_eq!(err.code(), ErrorCode::Unauthorized);
        }

        // Sixth attempt with the correct password still fails as locked
        let err = login(
            State(state.clone()),
            empty_jar(),
            Json(login_request("alice", "secret1", false)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LockedAccount);

        // Once the lock elapses the correct password works and the counter
        // resets
        let past = (Utc::now() - chrono::Duration::seconds(1)).to_rfc3339();
        sqlx::query("UPDATE users SET lock_until = ? WHERE username = 'alice'")
            .bind(&past)
            .execute(&state.db)
            .await
            .unwrap();

        let result = login(
            State(state.clone()),
            empty_jar(),
            Json(login_request("alice", "secret1", false)),
        )
        .await;
        assert!(result.is_ok());

        let (attempts, lock_until): (i64, Option<String>) =
            sqlx::query_as("SELECT login_attempts, lock_until FROM users WHERE username = 'alice'")
                .fetch_one(&state.db)
                .await
                .unwrap();
        assert_eq!(attempts, 0);
        assert!(lock_until.is_none());
    }

    #[tokio::test]
    async fn test_inactive_account_rejected() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();

        sqlx::query("UPDATE users SET is_active = 0 WHERE username = 'alice'")
            .execute(&state.db)
            .await
            .unwrap();

        let err = login(
            State(state),
            empty_jar(),
            Json(login_request("alice", "secret1", false)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InactiveAccount);
    }

    #[tokio::test]
    async fn test_remember_me_scales_session_expiry() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();

        login(
            State(state.clone()),
            empty_jar(),
            Json(login_request("alice", "secret1", false)),
        )
        .await
        .unwrap();
        login(
            State(state.clone()),
            empty_jar(),
            Json(login_request("alice", "secret1", true)),
        )
        .await
        .unwrap();

        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT expires_at FROM sessions ORDER BY created_at, expires_at")
                .fetch_all(&state.db)
                .await
                .unwrap();
        assert_eq!(rows.len(), 2);

        let two_days = (Utc::now() + chrono::Duration::days(2)).to_rfc3339();
        let twenty_days = (Utc::now() + chrono::Duration::days(20)).to_rfc3339();
        let (short, long) = if rows[0].0 < rows[1].0 {
            (&rows[0].0, &rows[1].0)
        } else {
            (&rows[1].0, &rows[0].0)
        };
        assert!(short < &two_days, "default session expires within a day");
        assert!(long > &twenty_days, "remember-me session lasts ~30 days");
    }

    #[tokio::test]
    async fn test_login_resolves_return_to_target() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();

        let jar = jar_with_cookie(RETURN_TO_COOKIE, "/suppliers");
        let (jar, response) = login(
            State(state),
            jar,
            Json(login_request("alice", "secret1", false)),
        )
        .await
        .unwrap();

        assert_eq!(response.redirect_to, "/suppliers");
        // Consumed: the jar now carries the removal for return_to
        assert!(jar
            .get(RETURN_TO_COOKIE)
            .map(|c| c.value().is_empty())
            .unwrap_or(true));
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();

        let (jar, _) = login(
            State(state.clone()),
            empty_jar(),
            Json(login_request("alice", "secret1", false)),
        )
        .await
        .unwrap();
        let token = jar.get(SESSION_COOKIE).unwrap().value().to_string();

        let session_jar = jar_with_cookie(SESSION_COOKIE, &token);
        let session = session_for_jar(&state, &session_jar).await;
        assert!(session.is_ok());

        logout(State(state.clone()), jar_with_cookie(SESSION_COOKIE, &token))
            .await
            .unwrap();

        let err = session_for_jar(&state, &jar_with_cookie(SESSION_COOKIE, &token))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_email_unique() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(register_request("alice", "alice@x.com", "secret1")),
        )
        .await
        .unwrap();
        register(
            State(state.clone()),
            Json(register_request("bob", "bob@x.com", "secret1")),
        )
        .await
        .unwrap();

        let alice: User = sqlx::query_as("SELECT * FROM users WHERE username = 'alice'")
            .fetch_one(&state.db)
            .await
            .unwrap();

        let err = update_profile(
            State(state.clone()),
            alice.clone(),
            Json(UpdateProfileRequest {
                full_name: "Alice A.".to_string(),
                email: "bob@x.com".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);

        let updated = update_profile(
            State(state),
            alice,
            Json(UpdateProfileRequest {
                full_name: "Alice A.".to_string(),
                email: "alice@new.com".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.email, "alice@new.com");
        assert_eq!(updated.full_name, "Alice A.");
    }
}
