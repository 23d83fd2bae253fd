// src/handlers/gallery.rs
// DOCUMENTATION: HTTP handlers for the farm gallery
// PURPOSE: Parse requests, call GalleryService, shape the JSON envelope

use crate::errors::ApiError;
use crate::models::{
    ApiResponse, CreateGalleryImageRequest, GalleryFilterQuery, GalleryImage,
    GalleryImageResponse, UpdateGalleryImageRequest,
};
use crate::services::GalleryService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /api/gallery
/// Active images, newest first
pub async fn list_images(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let images = GalleryService::list_active(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(to_responses(&images))))
}

/// GET /api/gallery/filter?crop=&status=&region=&label=&plotId=
pub async fn filter_images(
    pool: web::Data<PgPool>,
    query: web::Query<GalleryFilterQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();
    let images = GalleryService::filter_images(pool.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": images.len(),
        "data": to_responses(&images),
        "filters": query,
    })))
}

/// GET /api/gallery/options
pub async fn filter_options(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let options = GalleryService::filter_options(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(options)))
}

/// GET /api/gallery/stats
pub async fn gallery_stats(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let stats = GalleryService::stats(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(stats)))
}

/// POST /api/gallery/seed
pub async fn seed_images(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let images = GalleryService::seed_images(pool.get_ref()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::seeded(
        "Gallery images seeded successfully",
        to_responses(&images),
    )))
}

/// GET /api/gallery/plot/{plotId}
pub async fn images_for_plot(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<impl Responder, ApiError> {
    let plot_id = path.into_inner();
    let images = GalleryService::images_for_plot(pool.get_ref(), plot_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": images.len(),
        "plotId": plot_id,
        "data": to_responses(&images),
    })))
}

/// GET /api/gallery/{id}
pub async fn get_image(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let image = GalleryService::get_image(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(image.to_response())))
}

/// POST /api/gallery
pub async fn create_image(
    pool: web::Data<PgPool>,
    req: web::Json<CreateGalleryImageRequest>,
) -> Result<impl Responder, ApiError> {
    let mut req = req.into_inner();
    req.normalize();
    req.validate()?;

    let image = GalleryService::create_image(pool.get_ref(), req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Gallery image created successfully",
        image.to_response(),
    )))
}

/// PUT /api/gallery/{id}
pub async fn update_image(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateGalleryImageRequest>,
) -> Result<impl Responder, ApiError> {
    let mut req = req.into_inner();
    req.normalize();
    req.validate()?;

    let image = GalleryService::update_image(pool.get_ref(), path.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Gallery image updated successfully",
        image.to_response(),
    )))
}

/// DELETE /api/gallery/{id}
/// Soft delete
pub async fn delete_image(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GalleryService::soft_delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Gallery image deleted successfully")))
}

/// DELETE /api/gallery/{id}/hard
pub async fn hard_delete_image(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GalleryService::hard_delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Gallery image permanently deleted")))
}

fn to_responses(images: &[GalleryImage]) -> Vec<GalleryImageResponse> {
    images.iter().map(GalleryImage::to_response).collect()
}

/// Configuration for gallery routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/gallery")
            .route("", web::get().to(list_images))
            .route("", web::post().to(create_image))
            .route("/filter", web::get().to(filter_images))
            .route("/options", web::get().to(filter_options))
            .route("/stats", web::get().to(gallery_stats))
            .route("/seed", web::post().to(seed_images))
            .route("/plot/{plot_id}", web::get().to(images_for_plot))
            .route("/{id}", web::get().to(get_image))
            .route("/{id}", web::put().to(update_image))
            .route("/{id}", web::delete().to(delete_image))
            .route("/{id}/hard", web::delete().to(hard_delete_image)),
    );
}
