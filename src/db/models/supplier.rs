use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Product;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub created_at: String,
    pub updated_at: String,
}

/// List view: supplier plus how many products reference it
#[derive(Debug, Clone, Serialize)]
pub struct SupplierWithProductCount {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub created_at: String,
    pub updated_at: String,
    pub product_count: i64,
}

/// Detail view: supplier plus the products it owns
#[derive(Debug, Clone, Serialize)]
pub struct SupplierWithProducts {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub created_at: String,
    pub updated_at: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Result of a cascade delete, reported back to the caller
#[derive(Debug, Serialize)]
pub struct CascadeDeleteResponse {
    pub supplier_id: String,
    pub products_deleted: i64,
}
