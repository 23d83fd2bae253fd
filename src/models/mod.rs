// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod crop;
pub mod gallery;
pub mod response;
pub mod user;

pub use crop::*;
pub use gallery::*;
pub use response::*;
pub use user::*;
