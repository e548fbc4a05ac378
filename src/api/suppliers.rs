//! Supplier CRUD endpoints.
//!
//! Deleting a supplier is a two-step decision guarded by the reference
//! count of its products; the cascade variant is a separate, explicitly
//! invoked operation. Both run inside a transaction so the count check and
//! the delete are atomic with respect to concurrent product inserts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    CascadeDeleteResponse, CreateSupplierRequest, Product, Supplier, SupplierWithProductCount,
    SupplierWithProducts, UpdateSupplierRequest,
};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_address, validate_phone, validate_supplier_name, validate_uuid};

fn validate_create_request(req: &CreateSupplierRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_supplier_name(&req.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_address(&req.address) {
        errors.add("address", e);
    }
    if let Err(e) = validate_phone(&req.phone) {
        errors.add("phone", e);
    }

    errors.finish()
}

fn validate_update_request(req: &UpdateSupplierRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref name) = req.name {
        if let Err(e) = validate_supplier_name(name) {
            errors.add("name", e);
        }
    }
    if let Some(ref address) = req.address {
        if let Err(e) = validate_address(address) {
            errors.add("address", e);
        }
    }
    if let Some(ref phone) = req.phone {
        if let Err(e) = validate_phone(phone) {
            errors.add("phone", e);
        }
    }

    errors.finish()
}

/// Malformed lookup ids read as "no such supplier"
fn checked_id(id: &str) -> Result<(), ApiError> {
    validate_uuid(id, "supplier_id").map_err(|_| ApiError::not_found("Supplier not found"))
}

/// List all suppliers with their product counts
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SupplierWithProductCount>>, ApiError> {
    let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY name ASC")
        .fetch_all(&state.db)
        .await?;

    let mut results = Vec::new();
    for supplier in suppliers {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE supplier_id = ?")
            .bind(&supplier.id)
            .fetch_one(&state.db)
            .await?;

        results.push(SupplierWithProductCount {
            id: supplier.id,
            name: supplier.name,
            address: supplier.address,
            phone: supplier.phone,
            created_at: supplier.created_at,
            updated_at: supplier.updated_at,
            product_count: count.0,
        });
    }

    Ok(Json(results))
}

/// Get a supplier with its products
pub async fn get_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SupplierWithProducts>, ApiError> {
    checked_id(&id)?;

    let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Supplier not found"))?;

    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE supplier_id = ? ORDER BY name ASC",
    )
    .bind(&id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(SupplierWithProducts {
        id: supplier.id,
        name: supplier.name,
        address: supplier.address,
        phone: supplier.phone,
        created_at: supplier.created_at,
        updated_at: supplier.updated_at,
        products,
    }))
}

/// Create a new supplier
pub async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<Supplier>), ApiError> {
    validate_create_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO suppliers (id, name, address, phone, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.address)
    .bind(&req.phone)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    tracing::info!(supplier = %supplier.name, "Supplier created");

    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSupplierRequest>,
) -> Result<Json<Supplier>, ApiError> {
    checked_id(&id)?;
    validate_update_request(&req)?;

    let _existing = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Supplier not found"))?;

    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE suppliers SET
            name = COALESCE(?, name),
            address = COALESCE(?, address),
            phone = COALESCE(?, phone),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.name)
    .bind(&req.address)
    .bind(&req.phone)
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(supplier))
}

/// Delete a supplier, blocked while products still reference it.
///
/// The count check and the delete share one transaction, so a product
/// inserted between them cannot be orphaned.
pub async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    checked_id(&id)?;

    let mut tx = state.db.begin().await?;

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE supplier_id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    if count.0 > 0 {
        return Err(ApiError::referential_conflict(
            format!(
                "Cannot delete supplier: {} product(s) are associated with it",
                count.0
            ),
            count.0,
        ));
    }

    let result = sqlx::query("DELETE FROM suppliers WHERE id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Supplier not found"));
    }

    tx.commit().await?;

    tracing::info!(supplier_id = %id, "Supplier deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Cascade-delete a supplier and every product referencing it.
///
/// This is the explicit application-level operation; the standard delete
/// path never cascades. Supplier and products go in the same transaction,
/// so readers observe both removed or neither.
pub async fn cascade_delete_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CascadeDeleteResponse>, ApiError> {
    checked_id(&id)?;

    let mut tx = state.db.begin().await?;

    let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
        .bind(&id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Supplier not found"))?;

    let products_deleted = sqlx::query("DELETE FROM products WHERE supplier_id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?
        .rows_affected() as i64;

    sqlx::query("DELETE FROM suppliers WHERE id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        supplier = %supplier.name,
        products_deleted,
        "Supplier cascade-deleted"
    );

    Ok(Json(CascadeDeleteResponse {
        supplier_id: id,
        products_deleted,
    }))
}
