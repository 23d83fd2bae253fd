// src/services/user_service.rs
// DOCUMENTATION: Business logic for wallet users
// PURPOSE: Authenticate-or-create and address-keyed updates

use crate::db::UserRepository;
use crate::errors::ApiError;
use crate::models::{
    normalize_wallet_address, AuthRequest, AuthenticatedUser, UpdateUserRequest, User,
};
use sqlx::PgPool;

const USER_NOT_FOUND: &str = "User not found";

pub struct UserService;

impl UserService {
    pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, ApiError> {
        UserRepository::list_all(pool).await
    }

    /// Address casing is irrelevant: lookups use the lowercase form
    pub async fn get_user(pool: &PgPool, wallet_address: &str) -> Result<User, ApiError> {
        let address = normalize_wallet_address(wallet_address);
        UserRepository::find_by_address(pool, &address)
            .await?
            .ok_or_else(|| {
                log::warn!("User not found: {}", address);
                ApiError::NotFound(USER_NOT_FOUND.to_string())
            })
    }

    /// Log a wallet in, creating its user on first sight
    /// Expects a normalized, validated request
    pub async fn authenticate(pool: &PgPool, req: AuthRequest) -> Result<AuthenticatedUser, ApiError> {
        let address = req
            .wallet_address
            .ok_or_else(|| ApiError::ValidationError("Wallet address is required".to_string()))?;

        let (user, is_new_user) =
            UserRepository::upsert_login(pool, &address, req.chain_id, req.balance.as_deref())
                .await?;

        Ok(AuthenticatedUser { user, is_new_user })
    }

    /// Merge the provided fields into the user identified by `wallet_address`
    pub async fn update_user(
        pool: &PgPool,
        wallet_address: &str,
        req: UpdateUserRequest,
    ) -> Result<User, ApiError> {
        let mut user = Self::get_user(pool, wallet_address).await?;
        req.apply_to(&mut user);
        UserRepository::save(pool, user).await
    }

    /// Missing or empty balance is rejected before the store is touched
    pub async fn update_balance(
        pool: &PgPool,
        wallet_address: &str,
        balance: Option<&str>,
    ) -> Result<User, ApiError> {
        let balance =
            balance.ok_or_else(|| ApiError::ValidationError("Balance is required".to_string()))?;

        let address = normalize_wallet_address(wallet_address);
        UserRepository::update_balance(pool, &address, balance)
            .await?
            .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn delete_user(pool: &PgPool, wallet_address: &str) -> Result<(), ApiError> {
        let address = normalize_wallet_address(wallet_address);
        UserRepository::delete_by_address(pool, &address)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://taxfarm@127.0.0.1:1/unused")
            .unwrap()
    }

    #[actix_web::test]
    async fn test_authenticate_requires_address() {
        let err = UserService::authenticate(&unreachable_pool(), AuthRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Wallet address is required");
    }

    #[actix_web::test]
    async fn test_update_balance_requires_balance() {
        let err = UserService::update_balance(
            &unreachable_pool(),
            "0xabc0000000000000000000000000000000000def",
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }
}
