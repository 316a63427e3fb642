// src/presentation/http/controllers/mod.rs
pub mod admin;
pub mod auth;
pub mod catalog;
pub mod issues;
mod multipart;
