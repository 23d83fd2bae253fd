// src/handlers/crops.rs
// DOCUMENTATION: HTTP handlers for crop tokens
// PURPOSE: Parse requests, call CropService, shape the JSON envelope

use crate::errors::ApiError;
use crate::models::{ApiResponse, CreateCropRequest, UpdateCropRequest, UpdateCropStatusRequest};
use crate::services::CropService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// GET /api/crops
pub async fn list_crops(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let crops = CropService::list_crops(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(crops)))
}

/// GET /api/crops/active
pub async fn list_active_crops(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let crops = CropService::list_active_crops(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(crops)))
}

/// GET /api/crops/{symbol}
pub async fn get_crop(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let crop = CropService::get_crop(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(crop)))
}

/// POST /api/crops
pub async fn create_crop(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCropRequest>,
) -> Result<impl Responder, ApiError> {
    let mut req = req.into_inner();
    req.normalize();
    req.validate()?;

    let crop = CropService::create_crop(pool.get_ref(), req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message("Crop created successfully", crop)))
}

/// PUT /api/crops/{symbol}
/// Merge update; `isActive` follows the resulting status
pub async fn update_crop(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateCropRequest>,
) -> Result<impl Responder, ApiError> {
    let mut req = req.into_inner();
    req.normalize();
    req.validate()?;

    let crop = CropService::update_crop(pool.get_ref(), &path.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Crop updated successfully", crop)))
}

/// PUT /api/crops/{symbol}/status
pub async fn update_crop_status(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateCropStatusRequest>,
) -> Result<impl Responder, ApiError> {
    let crop =
        CropService::update_status(pool.get_ref(), &path.into_inner(), req.status.as_deref())
            .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Crop status updated successfully",
        crop,
    )))
}

/// DELETE /api/crops/{symbol}
pub async fn delete_crop(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    CropService::delete_crop(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Crop deleted successfully")))
}

/// POST /api/crops/seed
pub async fn seed_crops(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let crops = CropService::seed_crops(pool.get_ref()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::seeded("Crops seeded successfully", crops)))
}

/// Configuration for crop routes
/// Fixed segments are registered before `/{symbol}`
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/crops")
            .route("", web::get().to(list_crops))
            .route("", web::post().to(create_crop))
            .route("/active", web::get().to(list_active_crops))
            .route("/seed", web::post().to(seed_crops))
            .route("/{symbol}", web::get().to(get_crop))
            .route("/{symbol}", web::put().to(update_crop))
            .route("/{symbol}", web::delete().to(delete_crop))
            .route("/{symbol}/status", web::put().to(update_crop_status)),
    );
}
