// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for wallet users
// PURPOSE: Parse requests, call UserService; single users are returned under `user`

use crate::errors::ApiError;
use crate::models::{ApiResponse, AuthRequest, UpdateBalanceRequest, UpdateUserRequest};
use crate::services::UserService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// GET /api/users
pub async fn list_users(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let users = UserService::list_users(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(users)))
}

/// GET /api/users/{walletAddress}
pub async fn get_user(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let user = UserService::get_user(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}

/// POST /api/users/auth
/// 201 when the wallet is new, 200 when it was already known
pub async fn authenticate(
    pool: web::Data<PgPool>,
    req: web::Json<AuthRequest>,
) -> Result<impl Responder, ApiError> {
    let mut req = req.into_inner();
    req.normalize();
    req.validate()?;

    log::info!(
        "Authenticating wallet {}",
        req.wallet_address.as_deref().unwrap_or("<missing>")
    );

    let user = UserService::authenticate(pool.get_ref(), req).await?;
    let (mut response, message) = if user.is_new_user {
        (HttpResponse::Created(), "User created successfully")
    } else {
        (HttpResponse::Ok(), "User authenticated successfully")
    };

    Ok(response.json(json!({
        "success": true,
        "message": message,
        "user": user,
    })))
}

/// PUT /api/users/{walletAddress}
pub async fn update_user(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, ApiError> {
    let mut req = req.into_inner();
    req.normalize();
    req.validate()?;

    let user = UserService::update_user(pool.get_ref(), &path.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User updated successfully",
        "user": user,
    })))
}

/// PUT /api/users/{walletAddress}/balance
pub async fn update_balance(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateBalanceRequest>,
) -> Result<impl Responder, ApiError> {
    let user =
        UserService::update_balance(pool.get_ref(), &path.into_inner(), req.balance()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Balance updated successfully",
        "user": user,
    })))
}

/// DELETE /api/users/{walletAddress}
pub async fn delete_user(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    UserService::delete_user(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted successfully")))
}

/// Configuration for user routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("", web::get().to(list_users))
            .route("/auth", web::post().to(authenticate))
            .route("/{wallet_address}", web::get().to(get_user))
            .route("/{wallet_address}", web::put().to(update_user))
            .route("/{wallet_address}", web::delete().to(delete_user))
            .route("/{wallet_address}/balance", web::put().to(update_balance)),
    );
}
