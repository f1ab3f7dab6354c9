// Infrastructure layer - Configuration, stores, rendering and HTTP adapters
pub mod config;
pub mod http_response;
pub mod memory_registry;
pub mod memory_repository;
pub mod templates;
