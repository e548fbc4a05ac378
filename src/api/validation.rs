//! Input validation for API requests.
//!
//! Validation functions return `Result<(), String>` so callers can collect
//! failures per field with the `ValidationErrorBuilder` from the `error`
//! module.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating usernames (alphanumeric plus underscore, 3-30 chars)
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]{3,30}$").unwrap();

    /// Regex for validating email addresses (pragmatic, not RFC-complete)
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Regex for validating phone numbers (digits plus common punctuation)
    static ref PHONE_REGEX: Regex = Regex::new(r"^[\d\-\+\(\)\s]+$").unwrap();
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(
            "Username must be 3-30 characters of letters, digits or underscores".to_string(),
        );
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email address".to_string());
    }

    Ok(())
}

/// Validate a person's display name
pub fn validate_full_name(full_name: &str) -> Result<(), String> {
    if full_name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }

    if full_name.len() > 100 {
        return Err("Full name is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a password against the configured minimum length
pub fn validate_password(password: &str, min_length: usize) -> Result<(), String> {
    if password.len() < min_length {
        return Err(format!(
            "Password must be at least {} characters long",
            min_length
        ));
    }

    Ok(())
}

/// Validate a supplier name
pub fn validate_supplier_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Supplier name is required".to_string());
    }

    if name.len() > 100 {
        return Err("Supplier name is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a supplier address
pub fn validate_address(address: &str) -> Result<(), String> {
    if address.trim().is_empty() {
        return Err("Supplier address is required".to_string());
    }

    if address.len() > 200 {
        return Err("Address is too long (max 200 characters)".to_string());
    }

    Ok(())
}

/// Validate a phone number
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.trim().is_empty() {
        return Err("Phone number is required".to_string());
    }

    if !PHONE_REGEX.is_match(phone) {
        return Err("Please enter a valid phone number".to_string());
    }

    Ok(())
}

/// Validate a product name
pub fn validate_product_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Product name is required".to_string());
    }

    if name.len() > 100 {
        return Err("Product name is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a product price
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() {
        return Err("Price must be a number".to_string());
    }

    if price < 0.0 {
        return Err("Price cannot be negative".to_string());
    }

    Ok(())
}

/// Validate a product quantity
pub fn validate_quantity(quantity: i64) -> Result<(), String> {
    if quantity < 0 {
        return Err("Quantity cannot be negative".to_string());
    }

    Ok(())
}

/// Validate a UUID string
pub fn validate_uuid(id: &str, field_name: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} is required", field_name));
    }

    if uuid::Uuid::parse_str(id).is_err() {
        return Err(format!("Invalid {} format", field_name));
    }

    Ok(())
}
