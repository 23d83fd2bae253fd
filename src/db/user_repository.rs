// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Wallet-keyed lookups, the atomic login upsert and updates

use crate::errors::ApiError;
use crate::models::{User, DEFAULT_BALANCE, DEFAULT_CHAIN_ID};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Row returned by the login upsert
/// `inserted` is true when the statement created the row
#[derive(Debug, FromRow)]
struct UpsertedUser {
    #[sqlx(flatten)]
    user: User,
    inserted: bool,
}

pub struct UserRepository;

impl UserRepository {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list users: {}", e);
                ApiError::from(e)
            })
    }

    /// Lookup by wallet address; the caller passes the lowercase form
    pub async fn find_by_address(pool: &PgPool, address: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE wallet_address = $1")
            .bind(address)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user {}: {}", address, e);
                ApiError::from(e)
            })
    }

    /// Record a login for `address`, creating the user if needed
    /// DOCUMENTATION: A single INSERT .. ON CONFLICT statement, so two
    /// concurrent first logins for the same address cannot both insert.
    /// chain_id/balance overwrite stored values only when provided.
    /// Returns the user and whether it was created.
    pub async fn upsert_login(
        pool: &PgPool,
        address: &str,
        chain_id: Option<i64>,
        balance: Option<&str>,
    ) -> Result<(User, bool), ApiError> {
        let row = sqlx::query_as::<_, UpsertedUser>(
            r#"
            INSERT INTO users (
                id, wallet_address, chain_id, balance, is_active,
                last_login, created_at, updated_at
            )
            VALUES (
                $1, $2,
                COALESCE($3::BIGINT, $5::BIGINT),
                COALESCE($4::TEXT, $6::TEXT),
                true, NOW(), NOW(), NOW()
            )
            ON CONFLICT (wallet_address) DO UPDATE
            SET last_login = NOW(),
                chain_id = COALESCE($3::BIGINT, users.chain_id),
                balance = COALESCE($4::TEXT, users.balance),
                updated_at = NOW()
            RETURNING *, (xmax = 0) AS inserted
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(address)
        .bind(chain_id)
        .bind(balance)
        .bind(DEFAULT_CHAIN_ID)
        .bind(DEFAULT_BALANCE)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Login upsert failed for {}: {}", address, e);
            ApiError::from(e)
        })?;

        if row.inserted {
            log::info!("Created user {}", address);
        } else {
            log::info!("Authenticated user {}", address);
        }
        Ok((row.user, row.inserted))
    }

    /// Persist every mutable field of an existing user
    pub async fn save(pool: &PgPool, user: User) -> Result<User, ApiError> {
        let saved = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET wallet_address = $2,
                chain_id = $3,
                balance = $4,
                is_active = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.wallet_address)
        .bind(user.chain_id)
        .bind(&user.balance)
        .bind(user.is_active)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update user {}: {}", user.id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        log::info!("Updated user {}", saved.wallet_address);
        Ok(saved)
    }

    /// Set only the balance; None when no user has this address
    pub async fn update_balance(
        pool: &PgPool,
        address: &str,
        balance: &str,
    ) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET balance = $2, updated_at = NOW()
            WHERE wallet_address = $1
            RETURNING *
            "#,
        )
        .bind(address)
        .bind(balance)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Balance update failed for {}: {}", address, e);
            ApiError::from(e)
        })?;

        if user.is_some() {
            log::info!("Updated balance for {}", address);
        }
        Ok(user)
    }

    pub async fn delete_by_address(pool: &PgPool, address: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>("DELETE FROM users WHERE wallet_address = $1 RETURNING *")
            .bind(address)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for user {}: {}", address, e);
                ApiError::from(e)
            })?;

        if user.is_some() {
            log::info!("Deleted user {}", address);
        }
        Ok(user)
    }
}
