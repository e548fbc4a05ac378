//! Product CRUD endpoints.
//!
//! Every create/update validates that `supplier_id` resolves to an existing
//! supplier before touching the products table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    CreateProductRequest, Product, ProductWithSupplier, Supplier, UpdateProductRequest,
};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_price, validate_product_name, validate_quantity};

fn validate_create_request(req: &CreateProductRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_product_name(&req.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_price(req.price) {
        errors.add("price", e);
    }
    if let Err(e) = validate_quantity(req.quantity) {
        errors.add("quantity", e);
    }
    if req.supplier_id.is_empty() {
        errors.add("supplier_id", "Supplier is required");
    }

    errors.finish()
}

fn validate_update_request(req: &UpdateProductRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref name) = req.name {
        if let Err(e) = validate_product_name(name) {
            errors.add("name", e);
        }
    }
    if let Some(price) = req.price {
        if let Err(e) = validate_price(price) {
            errors.add("price", e);
        }
    }
    if let Some(quantity) = req.quantity {
        if let Err(e) = validate_quantity(quantity) {
            errors.add("quantity", e);
        }
    }

    errors.finish()
}

/// Malformed lookup ids read as "no such product"
fn checked_id(id: &str) -> Result<(), ApiError> {
    super::validation::validate_uuid(id, "product_id")
        .map_err(|_| ApiError::not_found("Product not found"))
}

/// The supplier reference must resolve at create/update time
async fn ensure_supplier_exists(state: &AppState, supplier_id: &str) -> Result<(), ApiError> {
    let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
        .bind(supplier_id)
        .fetch_optional(&state.db)
        .await?;

    if supplier.is_none() {
        return Err(ApiError::invalid_reference(
            "Selected supplier does not exist",
        ));
    }
    Ok(())
}

/// List all products with their supplier names
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductWithSupplier>>, ApiError> {
    let products = sqlx::query_as::<_, ProductWithSupplier>(
        "SELECT p.id, p.name, p.price, p.quantity, p.supplier_id,
                s.name AS supplier_name, p.created_at, p.updated_at
         FROM products p
         JOIN suppliers s ON s.id = p.supplier_id
         ORDER BY p.name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(products))
}

/// Get a product with its supplier
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductWithSupplier>, ApiError> {
    checked_id(&id)?;

    let product = sqlx::query_as::<_, ProductWithSupplier>(
        "SELECT p.id, p.name, p.price, p.quantity, p.supplier_id,
                s.name AS supplier_name, p.created_at, p.updated_at
         FROM products p
         JOIN suppliers s ON s.id = p.supplier_id
         WHERE p.id = ?",
    )
    .bind(&id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    validate_create_request(&req)?;
    ensure_supplier_exists(&state, &req.supplier_id).await?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO products (id, name, price, quantity, supplier_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(req.price)
    .bind(req.quantity)
    .bind(&req.supplier_id)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    tracing::info!(product = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    checked_id(&id)?;
    validate_update_request(&req)?;

    let _existing = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    if let Some(ref supplier_id) = req.supplier_id {
        ensure_supplier_exists(&state, supplier_id).await?;
    }

    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE products SET
            name = COALESCE(?, name),
            price = COALESCE(?, price),
            quantity = COALESCE(?, quantity),
            supplier_id = COALESCE(?, supplier_id),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.name)
    .bind(req.price)
    .bind(req.quantity)
    .bind(&req.supplier_id)
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    checked_id(&id)?;

    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorCode;
    use crate::api::suppliers::create_supplier;
    use crate::config::Config;
    use crate::db::CreateSupplierRequest;

    async fn test_state() -> Arc<AppState> {
        let pool = crate::db::test_pool().await;
        Arc::new(AppState::new(Config::default(), pool))
    }

    async fn create_test_supplier(state: &Arc<AppState>, name: &str) -> Supplier {
        let (_, supplier) = create_supplier(
            State(state.clone()),
            Json(CreateSupplierRequest {
                name: name.to_string(),
                address: "456 Commerce Street".to_string(),
                phone: "+1 (555) 987-6543".to_string(),
            }),
        )
        .await
        .unwrap();
        supplier.0
    }

    fn product_request(name: &str, supplier_id: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price: 29.99,
            quantity: 150,
            supplier_id: supplier_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_supplier() {
        let state = test_state().await;

        let err = create_product(
            State(state.clone()),
            Json(product_request(
                "Wireless Mouse",
                &Uuid::new_v4().to_string(),
            )),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidReference);

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_create_and_fetch_with_supplier_name() {
        let state = test_state().await;
        let supplier = create_test_supplier(&state, "Tech Solutions Inc.").await;

        let (status, product) = create_product(
            State(state.clone()),
            Json(product_request("Wireless Mouse", &supplier.id)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let fetched = get_product(State(state), Path(product.id.clone()))
            .await
            .unwrap();
        assert_eq!(fetched.name, "Wireless Mouse");
        assert_eq!(fetched.supplier_name, "Tech Solutions Inc.");
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price_and_quantity() {
        let state = test_state().await;
        let supplier = create_test_supplier(&state, "S1").await;

        let mut req = product_request("P1", &supplier.id);
        req.price = -1.0;
        let err = create_product(State(state.clone()), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let mut req = product_request("P1", &supplier.id);
        req.quantity = -5;
        let err = create_product(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_validates_new_supplier_reference() {
        let state = test_state().await;
        let supplier = create_test_supplier(&state, "S1").await;
        let (_, product) = create_product(
            State(state.clone()),
            Json(product_request("P1", &supplier.id)),
        )
        .await
        .unwrap();

        let err = update_product(
            State(state.clone()),
            Path(product.id.clone()),
            Json(UpdateProductRequest {
                name: None,
                price: None,
                quantity: None,
                supplier_id: Some(Uuid::new_v4().to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidReference);

        // A valid move to another supplier works
        let other = create_test_supplier(&state, "S2").await;
        let updated = update_product(
            State(state),
            Path(product.id.clone()),
            Json(UpdateProductRequest {
                name: None,
                price: Some(19.99),
                quantity: None,
                supplier_id: Some(other.id.clone()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.supplier_id, other.id);
        assert_eq!(updated.price, 19.99);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let state = test_state().await;
        let supplier = create_test_supplier(&state, "S1").await;
        let (_, product) = create_product(
            State(state.clone()),
            Json(product_request("P1", &supplier.id)),
        )
        .await
        .unwrap();

        let status = delete_product(State(state.clone()), Path(product.id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = delete_product(State(state), Path(product.id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_id_reads_as_not_found() {
        let state = test_state().await;
        let err = get_product(State(state), Path("definitely-not-a-uuid".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
