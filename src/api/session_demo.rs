//! Session demonstration endpoints.
//!
//! A JSON surface over the session's `data` blob: raw session contents, a
//! session-scoped cart and visit counters. Everything here operates on the
//! session record passed in through the extractor, never on ambient state.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::{CartItem, Session, SessionData, VisitRecord};
use crate::AppState;

use super::error::ApiError;

/// Visits retained per session
const VISIT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub product_name: String,
    #[serde(default = "default_cart_quantity")]
    pub quantity: i64,
}

fn default_cart_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct TrackVisitRequest {
    #[serde(default)]
    pub page: Option<String>,
}

async fn save_data(state: &AppState, session_id: &str, data: &SessionData) -> Result<(), ApiError> {
    let serialized = serde_json::to_string(data)
        .map_err(|e| ApiError::internal(format!("Failed to serialize session data: {}", e)))?;

    sqlx::query("UPDATE sessions SET data = ? WHERE id = ?")
        .bind(serialized)
        .bind(session_id)
        .execute(&state.db)
        .await?;

    Ok(())
}

/// Raw session contents
pub async fn session_info(session: Session) -> Json<Value> {
    let data = session.parse_data();

    Json(json!({
        "session_id": session.id,
        "user": {
            "id": session.user_id,
            "username": session.username,
            "email": session.email,
            "full_name": session.full_name,
            "role": session.role,
        },
        "login_time": session.login_time,
        "expires_at": session.expires_at,
        "data": data,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Set a session-scoped key/value pair
pub async fn set_value(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(req): Json<SetValueRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.key.is_empty() {
        return Err(ApiError::validation_field("key", "Key is required"));
    }

    let mut data = session.parse_data();
    data.kv.insert(req.key, req.value);
    save_data(&state, &session.id, &data).await?;

    Ok(Json(json!({
        "message": "Session data set successfully",
        "session_id": session.id,
        "data": data.kv,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// Get a session-scoped value by key
pub async fn get_value(session: Session, Path(key): Path<String>) -> Json<Value> {
    let data = session.parse_data();
    let value = data.kv.get(&key).cloned();

    Json(json!({
        "key": key,
        "value": value,
        "session_id": session.id,
        "all_session_data": data.kv,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Destroy the session entirely
pub async fn clear_session(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(&session.id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Session cleared successfully",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// Add an item to the session cart, merging quantities for repeat products
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.product_id.is_empty() || req.product_name.is_empty() {
        return Err(ApiError::validation_field(
            "product_id",
            "Product ID and name are required",
        ));
    }

    let mut data = session.parse_data();
    match data
        .cart
        .iter_mut()
        .find(|item| item.product_id == req.product_id)
    {
        Some(existing) => existing.quantity += req.quantity,
        None => data.cart.push(CartItem {
            product_id: req.product_id,
            product_name: req.product_name,
            quantity: req.quantity,
            added_at: Utc::now().to_rfc3339(),
        }),
    }
    save_data(&state, &session.id, &data).await?;

    Ok(Json(json!({
        "message": "Item added to cart",
        "cart": data.cart,
        "cart_count": data.cart.len(),
        "session_id": session.id,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// Cart contents with totals
pub async fn get_cart(session: Session) -> Json<Value> {
    let data = session.parse_data();
    let total_items: i64 = data.cart.iter().map(|item| item.quantity).sum();

    Json(json!({
        "cart": data.cart,
        "cart_count": data.cart.len(),
        "total_items": total_items,
        "session_id": session.id,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Empty the session cart
pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Value>, ApiError> {
    let mut data = session.parse_data();
    data.cart.clear();
    save_data(&state, &session.id, &data).await?;

    Ok(Json(json!({
        "message": "Cart cleared successfully",
        "cart": data.cart,
        "session_id": session.id,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// Track a page visit, keeping only the most recent entries
pub async fn track_visit(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Json(req): Json<TrackVisitRequest>,
) -> Result<Json<Value>, ApiError> {
    let page = req
        .page
        .or_else(|| {
            headers
                .get("referer")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut data = session.parse_data();
    data.visit_count += 1;
    data.visits.push(VisitRecord {
        page,
        timestamp: Utc::now().to_rfc3339(),
        user_agent,
    });
    if data.visits.len() > VISIT_HISTORY_LIMIT {
        let excess = data.visits.len() - VISIT_HISTORY_LIMIT;
        data.visits.drain(..excess);
    }
    save_data(&state, &session.id, &data).await?;

    Ok(Json(json!({
        "message": "Visit tracked",
        "visit_count": data.visit_count,
        "visits": data.visits,
        "session_id": session.id,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
