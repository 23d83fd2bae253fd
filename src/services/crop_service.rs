// src/services/crop_service.rs
// DOCUMENTATION: Business logic for crop tokens
// PURPOSE: Symbol normalization, uniqueness pre-checks and status transitions

use crate::db::CropRepository;
use crate::errors::ApiError;
use crate::models::{normalize_symbol, CreateCropRequest, Crop, CropStatus, UpdateCropRequest};
use crate::services::seed_data;
use sqlx::PgPool;

const CROP_NOT_FOUND: &str = "Crop not found";
const DUPLICATE_CROP: &str = "Crop with this name or symbol already exists";

pub struct CropService;

impl CropService {
    pub async fn list_crops(pool: &PgPool) -> Result<Vec<Crop>, ApiError> {
        CropRepository::list_all(pool).await
    }

    pub async fn list_active_crops(pool: &PgPool) -> Result<Vec<Crop>, ApiError> {
        CropRepository::list_active(pool).await
    }

    /// Case-insensitive: the symbol is uppercased before lookup
    pub async fn get_crop(pool: &PgPool, symbol: &str) -> Result<Crop, ApiError> {
        let symbol = normalize_symbol(symbol);
        CropRepository::find_by_symbol(pool, &symbol)
            .await?
            .ok_or_else(|| {
                log::warn!("Crop not found: {}", symbol);
                ApiError::NotFound(CROP_NOT_FOUND.to_string())
            })
    }

    /// Create a crop from a normalized, validated request
    /// Rejects a name or symbol that is already taken
    pub async fn create_crop(pool: &PgPool, req: CreateCropRequest) -> Result<Crop, ApiError> {
        if let Some(existing) =
            CropRepository::find_by_name_or_symbol(pool, &req.name, &req.symbol).await?
        {
            log::warn!(
                "Rejected duplicate crop {}/{} (existing {})",
                req.name,
                req.symbol,
                existing.id
            );
            return Err(ApiError::AlreadyExists(DUPLICATE_CROP.to_string()));
        }

        // The unique indexes still catch a concurrent insert of the same crop
        CropRepository::insert(pool, Crop::from_request(req))
            .await
            .map_err(duplicate_as_conflict)
    }

    /// Merge the provided fields into the crop identified by `symbol`
    pub async fn update_crop(
        pool: &PgPool,
        symbol: &str,
        req: UpdateCropRequest,
    ) -> Result<Crop, ApiError> {
        let mut crop = Self::get_crop(pool, symbol).await?;
        req.apply_to(&mut crop);

        CropRepository::save(pool, crop)
            .await
            .map_err(duplicate_as_conflict)
    }

    /// Status-only transition; `is_active` is resynced on save
    pub async fn update_status(
        pool: &PgPool,
        symbol: &str,
        status: Option<&str>,
    ) -> Result<Crop, ApiError> {
        let status = status
            .and_then(|raw| raw.parse::<CropStatus>().ok())
            .ok_or_else(|| {
                ApiError::ValidationError(
                    "Valid status is required (Active, Coming Soon, Completed, Paused)".to_string(),
                )
            })?;

        let mut crop = Self::get_crop(pool, symbol).await?;
        crop.status = status;

        CropRepository::save(pool, crop).await
    }

    /// Hard delete by symbol
    pub async fn delete_crop(pool: &PgPool, symbol: &str) -> Result<(), ApiError> {
        let symbol = normalize_symbol(symbol);
        match CropRepository::delete_by_symbol(pool, &symbol).await? {
            Some(_) => Ok(()),
            None => {
                log::warn!("Delete requested for unknown crop: {}", symbol);
                Err(ApiError::NotFound(CROP_NOT_FOUND.to_string()))
            }
        }
    }

    /// Insert the launch catalogue into an empty collection
    pub async fn seed_crops(pool: &PgPool) -> Result<Vec<Crop>, ApiError> {
        let crops = seed_data::initial_crops()?
            .into_iter()
            .map(|mut req| {
                req.normalize();
                Crop::from_request(req)
            })
            .collect();

        CropRepository::seed(pool, crops).await?.ok_or_else(|| {
            ApiError::AlreadyExists(
                "Crops already seeded. Use individual endpoints to add more crops.".to_string(),
            )
        })
    }
}

fn duplicate_as_conflict(err: ApiError) -> ApiError {
    match err {
        ApiError::AlreadyExists(_) => ApiError::AlreadyExists(DUPLICATE_CROP.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_as_conflict_rewrites_message() {
        let err = duplicate_as_conflict(ApiError::AlreadyExists("Duplicate key: crops_symbol_key".into()));
        assert_eq!(err.to_string(), DUPLICATE_CROP);

        let err = duplicate_as_conflict(ApiError::DatabaseError("timeout".into()));
        assert!(matches!(err, ApiError::DatabaseError(_)));
    }

    #[actix_web::test]
    async fn test_invalid_status_rejected_before_lookup() {
        // Lazy pool: any query would fail, so reaching the store would not yield a validation error
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://taxfarm@127.0.0.1:1/unused")
            .unwrap();

        let err = CropService::update_status(&pool, "spotato", Some("Harvesting"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));

        let err = CropService::update_status(&pool, "spotato", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }
}
