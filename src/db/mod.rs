pub mod credential_repository;
pub mod stats_repository;
