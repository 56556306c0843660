pub mod api;
pub mod app;
pub mod containers;
pub mod cookies;
pub mod mask;
pub mod page;
pub mod report;
pub mod router;
pub mod shortid;
pub mod store;
pub mod views;
