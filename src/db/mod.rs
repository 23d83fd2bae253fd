// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod crop_repository;
pub mod gallery_repository;
pub mod user_repository;

pub use crop_repository::*;
pub use gallery_repository::*;
pub use user_repository::*;
