// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Business logic between handlers and repositories

pub mod crop_service;
pub mod gallery_service;
pub mod seed_data;
pub mod user_service;

pub use crop_service::CropService;
pub use gallery_service::GalleryService;
pub use user_service::UserService;
