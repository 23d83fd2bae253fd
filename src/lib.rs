// src/lib.rs
// DOCUMENTATION: Library root shared by the server, the seed binary and tests
// PURPOSE: Expose configuration, storage, services and HTTP handlers

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
