// Domain layer - Plain dashboard data, no I/O
pub mod dashboard;
pub mod form;
pub mod stats;
pub mod user;
pub mod widget;
