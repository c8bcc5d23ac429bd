pub mod auth_service;
pub mod chat_service;
pub mod stats_service;
pub mod upload_service;
