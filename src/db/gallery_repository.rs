// src/db/gallery_repository.rs
// DOCUMENTATION: Gallery image database operations
// PURPOSE: Listing, filtering, soft/hard delete and aggregate queries

use crate::errors::ApiError;
use crate::models::{CountBucket, GalleryFilter, GalleryImage};
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Columns the statistics endpoint groups by
#[derive(Debug, Clone, Copy)]
pub enum GalleryGroup {
    Status,
    Region,
    Label,
}

impl GalleryGroup {
    fn column(&self) -> &'static str {
        match self {
            GalleryGroup::Status => "status",
            GalleryGroup::Region => "region",
            GalleryGroup::Label => "label",
        }
    }
}

pub struct GalleryRepository;

impl GalleryRepository {
    /// Active images, newest first
    pub async fn list_active(pool: &PgPool) -> Result<Vec<GalleryImage>, ApiError> {
        sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM gallery_images WHERE is_active = true ORDER BY date DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list gallery images: {}", e);
            ApiError::from(e)
        })
    }

    /// Active images matching the composite filter, newest first
    /// DOCUMENTATION: crop is a case-insensitive substring match; status,
    /// region and label are exact text matches; plotId is an exact integer
    pub async fn filter(
        pool: &PgPool,
        filter: &GalleryFilter,
    ) -> Result<Vec<GalleryImage>, ApiError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT * FROM gallery_images WHERE is_active = true");

        if let Some(crop) = &filter.crop {
            builder
                .push(" AND POSITION(LOWER(")
                .push_bind(crop.clone())
                .push(") IN LOWER(crop)) > 0");
        }
        if let Some(status) = &filter.status {
            builder.push(" AND status::text = ").push_bind(status.clone());
        }
        if let Some(region) = &filter.region {
            builder.push(" AND region::text = ").push_bind(region.clone());
        }
        if let Some(label) = &filter.label {
            builder.push(" AND label::text = ").push_bind(label.clone());
        }
        if let Some(plot_id) = filter.plot_id {
            builder.push(" AND plot_id = ").push_bind(plot_id);
        }
        builder.push(" ORDER BY date DESC");

        log::debug!("Executing gallery filter: {}", builder.sql());

        builder
            .build_query_as::<GalleryImage>()
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Gallery filter query error: {}", e);
                ApiError::from(e)
            })
    }

    /// Lookup by id regardless of soft-delete state
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<GalleryImage>, ApiError> {
        sqlx::query_as::<_, GalleryImage>("SELECT * FROM gallery_images WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch gallery image {}: {}", id, e);
                ApiError::from(e)
            })
    }

    /// Active images of one plot, newest first
    pub async fn list_by_plot(pool: &PgPool, plot_id: i32) -> Result<Vec<GalleryImage>, ApiError> {
        sqlx::query_as::<_, GalleryImage>(
            r#"
            SELECT * FROM gallery_images
            WHERE plot_id = $1 AND is_active = true
            ORDER BY date DESC
            "#,
        )
        .bind(plot_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list images for plot {}: {}", plot_id, e);
            ApiError::from(e)
        })
    }

    /// Insert a new image; a missing `image_alt` is synthesized first
    pub async fn insert(pool: &PgPool, mut image: GalleryImage) -> Result<GalleryImage, ApiError> {
        image.fill_derived_fields();

        let created = insert_row(pool, &image).await.map_err(|e| {
            log::error!("Failed to create gallery image for plot {}: {}", image.plot_id, e);
            ApiError::from(e)
        })?;

        log::info!("Created gallery image {} (plot {})", created.id, created.plot_id);
        Ok(created)
    }

    /// Persist every field of an existing image; a missing `image_alt` is synthesized first
    pub async fn save(pool: &PgPool, mut image: GalleryImage) -> Result<GalleryImage, ApiError> {
        image.fill_derived_fields();

        let saved = sqlx::query_as::<_, GalleryImage>(
            r#"
            UPDATE gallery_images
            SET plot_name = $2,
                plot_id = $3,
                status = $4,
                crop = $5,
                region = $6,
                label = $7,
                caption = $8,
                date = $9,
                image = $10,
                image_alt = $11,
                is_active = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(image.id)
        .bind(&image.plot_name)
        .bind(image.plot_id)
        .bind(image.status)
        .bind(&image.crop)
        .bind(image.region)
        .bind(image.label)
        .bind(&image.caption)
        .bind(image.date)
        .bind(&image.image)
        .bind(&image.image_alt)
        .bind(image.is_active)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update gallery image {}: {}", image.id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| {
            log::warn!("Gallery image disappeared before update: {}", image.id);
            ApiError::NotFound("Gallery image not found".to_string())
        })?;

        log::info!("Updated gallery image {}", saved.id);
        Ok(saved)
    }

    /// Soft delete: hide from listings, keep the row
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<Option<GalleryImage>, ApiError> {
        let image = sqlx::query_as::<_, GalleryImage>(
            r#"
            UPDATE gallery_images
            SET is_active = false, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Soft delete failed for gallery image {}: {}", id, e);
            ApiError::from(e)
        })?;

        if image.is_some() {
            log::info!("Soft deleted gallery image {}", id);
        }
        Ok(image)
    }

    /// Permanent removal
    pub async fn hard_delete(pool: &PgPool, id: Uuid) -> Result<Option<GalleryImage>, ApiError> {
        let image = sqlx::query_as::<_, GalleryImage>(
            "DELETE FROM gallery_images WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Hard delete failed for gallery image {}: {}", id, e);
            ApiError::from(e)
        })?;

        if image.is_some() {
            log::info!("Permanently deleted gallery image {}", id);
        }
        Ok(image)
    }

    /// Distinct crop names across all images, sorted
    pub async fn distinct_crops(pool: &PgPool) -> Result<Vec<String>, ApiError> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT crop FROM gallery_images ORDER BY crop")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list distinct crops: {}", e);
                ApiError::from(e)
            })
    }

    /// Distinct regions across all images, sorted by name
    pub async fn distinct_regions(pool: &PgPool) -> Result<Vec<String>, ApiError> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT region::text AS region FROM gallery_images ORDER BY region",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list distinct regions: {}", e);
            ApiError::from(e)
        })
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64, ApiError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery_images WHERE is_active = true")
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Count query error: {}", e);
                ApiError::from(e)
            })
    }

    /// Active images grouped by one column, largest group first
    pub async fn count_active_by(
        pool: &PgPool,
        group: GalleryGroup,
    ) -> Result<Vec<CountBucket>, ApiError> {
        let column = group.column();
        let sql = format!(
            "SELECT {column}::text AS value, COUNT(*) AS count \
             FROM gallery_images WHERE is_active = true \
             GROUP BY {column} ORDER BY count DESC, value ASC"
        );

        sqlx::query_as::<_, CountBucket>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Aggregate by {} failed: {}", column, e);
                ApiError::from(e)
            })
    }

    /// The `limit` most recent active images
    pub async fn recent_active(pool: &PgPool, limit: i64) -> Result<Vec<GalleryImage>, ApiError> {
        sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM gallery_images WHERE is_active = true ORDER BY date DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list recent gallery images: {}", e);
            ApiError::from(e)
        })
    }

    /// Insert the given images only if the table is empty
    /// DOCUMENTATION: Same locking policy as the crop seed; returns None when
    /// images already exist.
    pub async fn seed(
        pool: &PgPool,
        images: Vec<GalleryImage>,
    ) -> Result<Option<Vec<GalleryImage>>, ApiError> {
        let mut tx = pool.begin().await.map_err(ApiError::from)?;

        sqlx::query("LOCK TABLE gallery_images IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(ApiError::from)?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gallery_images")
            .fetch_one(&mut *tx)
            .await
            .map_err(ApiError::from)?;

        if existing > 0 {
            log::warn!("Gallery seed skipped: {} images already present", existing);
            return Ok(None);
        }

        let mut created = Vec::with_capacity(images.len());
        for mut image in images {
            image.fill_derived_fields();
            let row = insert_row(&mut *tx, &image).await.map_err(|e| {
                log::error!("Failed to seed gallery image {}: {}", image.plot_name, e);
                ApiError::from(e)
            })?;
            created.push(row);
        }

        tx.commit().await.map_err(ApiError::from)?;

        // Same order as the listing endpoints
        created.sort_by(|a, b| b.date.cmp(&a.date));

        log::info!("Seeded {} gallery images", created.len());
        Ok(Some(created))
    }
}

async fn insert_row<'e, E>(executor: E, image: &GalleryImage) -> Result<GalleryImage, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, GalleryImage>(
        r#"
        INSERT INTO gallery_images (
            id, plot_name, plot_id, status, crop, region, label,
            caption, date, image, image_alt, is_active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(image.id)
    .bind(&image.plot_name)
    .bind(image.plot_id)
    .bind(image.status)
    .bind(&image.crop)
    .bind(image.region)
    .bind(image.label)
    .bind(&image.caption)
    .bind(image.date)
    .bind(&image.image)
    .bind(&image.image_alt)
    .bind(image.is_active)
    .fetch_one(executor)
    .await
}
