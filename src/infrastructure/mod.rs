pub mod database;
pub mod notification;
pub mod report;
pub mod repositories;
pub mod security;
pub mod seed;
pub mod storage;
pub mod time;
