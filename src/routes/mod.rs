pub mod api_routes;
pub mod auth_routes;
pub mod health_routes;
