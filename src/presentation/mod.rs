// Presentation layer - HTTP surface
pub mod app_state;
pub mod current_user;
pub mod errors;
pub mod handlers;
pub mod router;
