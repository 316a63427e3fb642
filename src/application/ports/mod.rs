// src/application/ports/mod.rs
pub mod notification;
pub mod report;
pub mod security;
pub mod storage;
pub mod time;
