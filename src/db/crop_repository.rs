// src/db/crop_repository.rs
// DOCUMENTATION: Crop database operations
// PURPOSE: All SQL touching the crops table

use crate::errors::ApiError;
use crate::models::Crop;
use sqlx::{PgExecutor, PgPool};

pub struct CropRepository;

impl CropRepository {
    /// All crops in insertion order
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Crop>, ApiError> {
        sqlx::query_as::<_, Crop>("SELECT * FROM crops ORDER BY created_at ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list crops: {}", e);
                ApiError::from(e)
            })
    }

    /// Crops with status Active (and therefore is_active)
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Crop>, ApiError> {
        sqlx::query_as::<_, Crop>(
            r#"
            SELECT * FROM crops
            WHERE status = 'Active' AND is_active = true
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list active crops: {}", e);
            ApiError::from(e)
        })
    }

    /// Lookup by symbol; the caller passes the normalized (uppercase) form
    pub async fn find_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Crop>, ApiError> {
        sqlx::query_as::<_, Crop>("SELECT * FROM crops WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch crop {}: {}", symbol, e);
                ApiError::from(e)
            })
    }

    /// Any crop already using this name or this symbol
    pub async fn find_by_name_or_symbol(
        pool: &PgPool,
        name: &str,
        symbol: &str,
    ) -> Result<Option<Crop>, ApiError> {
        sqlx::query_as::<_, Crop>("SELECT * FROM crops WHERE name = $1 OR symbol = $2 LIMIT 1")
            .bind(name)
            .bind(symbol)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to check crop uniqueness: {}", e);
                ApiError::from(e)
            })
    }

    /// Insert a new crop; `is_active` is recomputed from `status` first
    pub async fn insert(pool: &PgPool, mut crop: Crop) -> Result<Crop, ApiError> {
        crop.sync_derived_fields();

        let created = insert_row(pool, &crop).await.map_err(|e| {
            log::error!("Failed to create crop {}: {}", crop.symbol, e);
            ApiError::from(e)
        })?;

        log::info!("Created crop {} ({})", created.symbol, created.id);
        Ok(created)
    }

    /// Persist every field of an existing crop; `is_active` is recomputed first
    pub async fn save(pool: &PgPool, mut crop: Crop) -> Result<Crop, ApiError> {
        crop.sync_derived_fields();

        let saved = sqlx::query_as::<_, Crop>(
            r#"
            UPDATE crops
            SET name = $2,
                symbol = $3,
                crop = $4,
                image = $5,
                land_area = $6,
                yield_season = $7,
                status = $8,
                tvl = $9,
                apy = $10,
                yield_logic = $11,
                bg_color = $12,
                status_color = $13,
                is_active = $14,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(crop.id)
        .bind(&crop.name)
        .bind(&crop.symbol)
        .bind(&crop.crop)
        .bind(&crop.image)
        .bind(&crop.land_area)
        .bind(&crop.yield_season)
        .bind(crop.status)
        .bind(&crop.tvl)
        .bind(&crop.apy)
        .bind(&crop.yield_logic)
        .bind(&crop.bg_color)
        .bind(&crop.status_color)
        .bind(crop.is_active)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update crop {}: {}", crop.id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| {
            log::warn!("Crop disappeared before update: {}", crop.id);
            ApiError::NotFound("Crop not found".to_string())
        })?;

        log::info!("Updated crop {} (status {})", saved.symbol, saved.status);
        Ok(saved)
    }

    /// Hard delete; returns the removed crop if there was one
    pub async fn delete_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Crop>, ApiError> {
        let deleted = sqlx::query_as::<_, Crop>("DELETE FROM crops WHERE symbol = $1 RETURNING *")
            .bind(symbol)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete crop {}: {}", symbol, e);
                ApiError::from(e)
            })?;

        if deleted.is_some() {
            log::info!("Deleted crop {}", symbol);
        }
        Ok(deleted)
    }

    /// Insert the given crops only if the table is empty
    /// DOCUMENTATION: Runs in one transaction under an exclusive table lock so
    /// concurrent seed calls cannot both populate the table.
    /// Returns None (and writes nothing) when crops already exist.
    pub async fn seed(pool: &PgPool, crops: Vec<Crop>) -> Result<Option<Vec<Crop>>, ApiError> {
        let mut tx = pool.begin().await.map_err(ApiError::from)?;

        sqlx::query("LOCK TABLE crops IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(ApiError::from)?;

        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM crops")
            .fetch_one(&mut *tx)
            .await
            .map_err(ApiError::from)?;

        if existing > 0 {
            log::warn!("Crop seed skipped: {} crops already present", existing);
            return Ok(None);
        }

        let mut created = Vec::with_capacity(crops.len());
        for mut crop in crops {
            crop.sync_derived_fields();
            let row = insert_row(&mut *tx, &crop).await.map_err(|e| {
                log::error!("Failed to seed crop {}: {}", crop.symbol, e);
                ApiError::from(e)
            })?;
            created.push(row);
        }

        tx.commit().await.map_err(ApiError::from)?;

        log::info!("Seeded {} crops", created.len());
        Ok(Some(created))
    }
}

async fn insert_row<'e, E>(executor: E, crop: &Crop) -> Result<Crop, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Crop>(
        r#"
        INSERT INTO crops (
            id, name, symbol, crop, image, land_area, yield_season,
            status, tvl, apy, yield_logic, bg_color, status_color,
            is_active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(crop.id)
    .bind(&crop.name)
    .bind(&crop.symbol)
    .bind(&crop.crop)
    .bind(&crop.image)
    .bind(&crop.land_area)
    .bind(&crop.yield_season)
    .bind(crop.status)
    .bind(&crop.tvl)
    .bind(&crop.apy)
    .bind(&crop.yield_logic)
    .bind(&crop.bg_color)
    .bind(&crop.status_color)
    .bind(crop.is_active)
    .fetch_one(executor)
    .await
}
