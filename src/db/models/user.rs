//! User and session models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub login_attempts: i64,
    pub lock_until: Option<String>,
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Public view of a user, without credential or lockout state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub last_login: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            last_login: user.last_login,
        }
    }
}

/// Server-side session record. Carries a snapshot of the user identity
/// taken at login plus a free-form JSON `data` blob for the demo endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub login_time: String,
    pub data: String,
    pub expires_at: String,
    pub created_at: String,
}

impl Session {
    pub fn parse_data(&self) -> SessionData {
        serde_json::from_str(&self.data).unwrap_or_default()
    }
}

/// Typed view of the session `data` column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub kv: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub visits: Vec<VisitRecord>,
    #[serde(default)]
    pub visit_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub added_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    pub page: String,
    pub timestamp: String,
    pub user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub redirect_to: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub email: String,
}
