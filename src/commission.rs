// src/commission.rs
//! Commission rate math. Pure functions; persistence lives in the handlers.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Effective rates never exceed this, whatever the bonuses add up to.
pub const MAX_EFFECTIVE_RATE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Product,
    Package,
    Service,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Product => "product",
            ProductType::Package => "package",
            ProductType::Service => "service",
        }
    }
}

pub fn tier_bonus(tier_level: i64) -> f64 {
    if tier_level >= 3 {
        5.0
    } else if tier_level >= 2 {
        2.0
    } else {
        0.0
    }
}

pub fn product_bonus(product_type: ProductType) -> f64 {
    match product_type {
        ProductType::Package => 3.0,
        ProductType::Service => 1.0,
        ProductType::Product => 0.0,
    }
}

pub fn effective_rate(base_rate: f64, tier_level: i64, product_type: ProductType) -> f64 {
    (base_rate + tier_bonus(tier_level) + product_bonus(product_type)).min(MAX_EFFECTIVE_RATE)
}

/// Standard half-away-from-zero rounding to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn commission_amount(sale_amount: f64, rate: f64) -> f64 {
    round_cents(sale_amount * rate / 100.0)
}

pub fn validate_rate(rate: f64) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&rate) {
        return Err(AppError::validation("Commission rate must be between 0 and 100"));
    }
    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("Amount must be greater than 0"));
    }
    Ok(())
}
