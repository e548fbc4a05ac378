//! Demo-data seeding.
//!
//! Populates an empty database with a small demo inventory and a few
//! well-known accounts. Invoked via the `--seed` CLI flag.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::api::auth::hash_password;

/// Seed demo suppliers, products and users. Skipped when data already exists.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    let supplier_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM suppliers")
        .fetch_one(pool)
        .await?;
    let user_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if supplier_count.0 > 0 || user_count.0 > 0 {
        info!("Database already contains data, skipping seed");
        return Ok(());
    }

    info!("Seeding demo data...");

    let now = chrono::Utc::now().to_rfc3339();

    // (name, address, phone)
    let suppliers: Vec<(&str, &str, &str)> = vec![
        (
            "Tech Solutions Inc.",
            "123 Technology Drive, Silicon Valley, CA 94043",
            "+1 (555) 123-4567",
        ),
        (
            "Global Electronics Ltd.",
            "456 Commerce Street, New York, NY 10001",
            "+1 (555) 987-6543",
        ),
        (
            "Premium Components Co.",
            "789 Industrial Boulevard, Chicago, IL 60601",
            "+1 (555) 456-7890",
        ),
        (
            "Modern Supplies Corp.",
            "321 Business Ave, Austin, TX 73301",
            "+1 (555) 234-5678",
        ),
        (
            "Quality Hardware Group",
            "654 Manufacturing Lane, Detroit, MI 48201",
            "+1 (555) 345-6789",
        ),
    ];

    let mut supplier_ids = Vec::new();
    for (name, address, phone) in &suppliers {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO suppliers (id, name, address, phone, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;
        supplier_ids.push(id);
    }
    info!("Created {} suppliers", supplier_ids.len());

    // (name, price, quantity, supplier index)
    let products: Vec<(&str, f64, i64, usize)> = vec![
        ("Wireless Bluetooth Mouse", 29.99, 150, 0),
        ("USB-C Charging Cable", 19.99, 200, 0),
        ("24-inch LED Monitor", 199.99, 75, 1),
        ("Mechanical Keyboard", 89.99, 100, 1),
        ("Webcam HD 1080p", 49.99, 80, 2),
        ("Laptop Stand Aluminum", 39.99, 60, 2),
        ("External SSD 1TB", 129.99, 45, 3),
        ("Noise Cancelling Headphones", 149.99, 55, 3),
        ("Desk Lamp LED", 24.99, 120, 4),
        ("Cable Organizer Kit", 14.99, 300, 4),
    ];

    for (name, price, quantity, supplier_idx) in &products {
        sqlx::query(
            "INSERT INTO products (id, name, price, quantity, supplier_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(price)
        .bind(quantity)
        .bind(&supplier_ids[*supplier_idx])
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;
    }
    info!("Created {} products", products.len());

    // (username, email, password, full name, role)
    let users: Vec<(&str, &str, &str, &str, &str)> = vec![
        ("testuser", "test@example.com", "test123", "Test User", "user"),
        ("admin", "admin@example.com", "admin123", "Administrator", "admin"),
        ("demo", "demo@example.com", "demo123", "Demo User", "user"),
    ];

    for (username, email, password, full_name, role) in &users {
        let password_hash = hash_password(password)
            .map_err(|e| anyhow::anyhow!("Failed to hash seed password: {}", e))?;
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, full_name, role,
                                is_active, login_attempts, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 1, 0, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(full_name)
        .bind(role)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;
    }
    info!("Created {} users", users.len());

    info!("Demo data seeded");
    Ok(())
}
