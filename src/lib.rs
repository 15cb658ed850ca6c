pub mod best_effort;
pub mod config;
pub mod coupon;
pub mod csrf;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod relay;
pub mod session;
pub mod store;
pub mod templates_structs;
