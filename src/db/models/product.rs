use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub supplier_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// List/detail view joined with the owning supplier's name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductWithSupplier {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub supplier_id: String,
    pub supplier_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    pub supplier_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub supplier_id: Option<String>,
}
