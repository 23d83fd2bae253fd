// src/services/gallery_service.rs
// DOCUMENTATION: Business logic for the farm gallery
// PURPOSE: Soft/hard delete semantics, filter options and statistics

use crate::db::{GalleryGroup, GalleryRepository};
use crate::errors::ApiError;
use crate::models::{
    CreateGalleryImageRequest, GalleryBreakdown, GalleryFilterOptions, GalleryFilterQuery,
    GalleryImage, GalleryLabel, GalleryStats, GalleryStatus, UpdateGalleryImageRequest,
};
use crate::services::seed_data;
use sqlx::PgPool;
use uuid::Uuid;

const IMAGE_NOT_FOUND: &str = "Gallery image not found";

/// Number of images in the stats "recent" list
const RECENT_IMAGES: i64 = 5;

pub struct GalleryService;

impl GalleryService {
    pub async fn list_active(pool: &PgPool) -> Result<Vec<GalleryImage>, ApiError> {
        GalleryRepository::list_active(pool).await
    }

    /// A malformed plotId is rejected before the store is queried
    pub async fn filter_images(
        pool: &PgPool,
        query: &GalleryFilterQuery,
    ) -> Result<Vec<GalleryImage>, ApiError> {
        let filter = query.to_filter()?;
        GalleryRepository::filter(pool, &filter).await
    }

    /// Direct lookup; soft-deleted images are still returned
    pub async fn get_image(pool: &PgPool, id: Uuid) -> Result<GalleryImage, ApiError> {
        GalleryRepository::get_by_id(pool, id)
            .await?
            .ok_or_else(|| {
                log::warn!("Gallery image not found: {}", id);
                ApiError::NotFound(IMAGE_NOT_FOUND.to_string())
            })
    }

    pub async fn images_for_plot(pool: &PgPool, plot_id: i32) -> Result<Vec<GalleryImage>, ApiError> {
        GalleryRepository::list_by_plot(pool, plot_id).await
    }

    pub async fn create_image(
        pool: &PgPool,
        req: CreateGalleryImageRequest,
    ) -> Result<GalleryImage, ApiError> {
        GalleryRepository::insert(pool, GalleryImage::from_request(req)).await
    }

    pub async fn update_image(
        pool: &PgPool,
        id: Uuid,
        req: UpdateGalleryImageRequest,
    ) -> Result<GalleryImage, ApiError> {
        let mut image = Self::get_image(pool, id).await?;
        req.apply_to(&mut image);
        GalleryRepository::save(pool, image).await
    }

    /// Hide the image from listings; the record is kept
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        GalleryRepository::soft_delete(pool, id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(IMAGE_NOT_FOUND.to_string()))
    }

    pub async fn hard_delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        GalleryRepository::hard_delete(pool, id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(IMAGE_NOT_FOUND.to_string()))
    }

    /// Distinct crops/regions plus the fixed status and label vocabularies
    pub async fn filter_options(pool: &PgPool) -> Result<GalleryFilterOptions, ApiError> {
        let (crops, regions) = tokio::try_join!(
            GalleryRepository::distinct_crops(pool),
            GalleryRepository::distinct_regions(pool),
        )?;

        Ok(GalleryFilterOptions {
            crops,
            regions,
            statuses: GalleryStatus::ALL.iter().map(|s| s.as_str()).collect(),
            labels: GalleryLabel::ALL.iter().map(|l| l.as_str()).collect(),
        })
    }

    /// Counts and recent images, queried concurrently
    pub async fn stats(pool: &PgPool) -> Result<GalleryStats, ApiError> {
        let (total_images, by_status, by_region, by_label, recent) = tokio::try_join!(
            GalleryRepository::count_active(pool),
            GalleryRepository::count_active_by(pool, GalleryGroup::Status),
            GalleryRepository::count_active_by(pool, GalleryGroup::Region),
            GalleryRepository::count_active_by(pool, GalleryGroup::Label),
            GalleryRepository::recent_active(pool, RECENT_IMAGES),
        )?;

        Ok(GalleryStats {
            total_images,
            breakdown: GalleryBreakdown {
                by_status,
                by_region,
                by_label,
            },
            recent_images: recent.iter().map(GalleryImage::to_response).collect(),
        })
    }

    /// Insert the launch photos into an empty collection
    pub async fn seed_images(pool: &PgPool) -> Result<Vec<GalleryImage>, ApiError> {
        let images = seed_data::initial_gallery_images()?
            .into_iter()
            .map(|mut req| {
                req.normalize();
                GalleryImage::from_request(req)
            })
            .collect();

        GalleryRepository::seed(pool, images).await?.ok_or_else(|| {
            ApiError::AlreadyExists(
                "Gallery images already seeded. Use individual endpoints to add more images."
                    .to_string(),
            )
        })
    }
}
