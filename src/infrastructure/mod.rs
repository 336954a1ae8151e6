// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod geoservice_repository;
pub mod http_response;
pub mod json_mapper;
pub mod page;
