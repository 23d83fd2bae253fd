// src/models/user.rs
// DOCUMENTATION: Wallet users and request DTOs
// PURPOSE: Address normalization/validation for the authenticate-or-create flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Chain assumed when none is given (Ethereum mainnet)
pub const DEFAULT_CHAIN_ID: i64 = 1;

pub const DEFAULT_BALANCE: &str = "0";

/// Represents a user record from the database
/// DOCUMENTATION: Maps to the `users` table; identity is the lowercase wallet address
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub wallet_address: String,
    pub chain_id: i64,
    pub balance: String,
    pub is_active: bool,

    /// Refreshed on every successful authenticate call
    pub last_login: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as returned by POST /api/users/auth
/// `is_new_user` only exists in the response, it is never stored
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    pub user: User,
    pub is_new_user: bool,
}

/// Body of POST /api/users/auth
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[validate(custom = "validate_wallet_address")]
    pub wallet_address: Option<String>,

    /// Overwrites the stored chain only when present
    pub chain_id: Option<i64>,

    /// Overwrites the stored balance only when present
    pub balance: Option<String>,
}

impl AuthRequest {
    pub fn normalize(&mut self) {
        self.wallet_address = self
            .wallet_address
            .take()
            .map(|address| normalize_wallet_address(&address))
            .filter(|address| !address.is_empty());
    }
}

/// Body of PUT /api/users/{walletAddress}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom = "validate_wallet_address")]
    pub wallet_address: Option<String>,
    pub chain_id: Option<i64>,
    pub balance: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn normalize(&mut self) {
        if let Some(address) = self.wallet_address.as_mut() {
            *address = normalize_wallet_address(address);
        }
    }

    /// Merge provided fields into an existing record
    pub fn apply_to(self, user: &mut User) {
        if let Some(wallet_address) = self.wallet_address {
            user.wallet_address = wallet_address;
        }
        if let Some(chain_id) = self.chain_id {
            user.chain_id = chain_id;
        }
        if let Some(balance) = self.balance {
            user.balance = balance;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// Body of PUT /api/users/{walletAddress}/balance
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBalanceRequest {
    pub balance: Option<String>,
}

impl UpdateBalanceRequest {
    /// Missing and empty balances are both rejected
    pub fn balance(&self) -> Option<&str> {
        self.balance
            .as_deref()
            .map(str::trim)
            .filter(|balance| !balance.is_empty())
    }
}

/// Addresses are compared and stored lowercase
pub fn normalize_wallet_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// `0x` followed by exactly 40 hex digits
pub fn is_valid_wallet_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(digits) => digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn validate_wallet_address(address: &str) -> Result<(), ValidationError> {
    if is_valid_wallet_address(address) {
        return Ok(());
    }
    let mut error = ValidationError::new("wallet_address");
    error.message = Some("Please enter a valid Ethereum wallet address".into());
    Err(error)
}
