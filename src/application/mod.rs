// Application layer - Use cases, extension points and collaborator traits
pub mod core_modules;
pub mod dashboard_repository;
pub mod dashboard_service;
pub mod errors;
pub mod extensions;
pub mod hook_bus;
pub mod widget_actions;
pub mod widget_composer;
