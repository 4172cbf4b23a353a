//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (route table snapshot, lookup)
//!     → response.rs (status, body, x-route-name)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use response::X_ROUTE_NAME;
pub use server::{AppState, HttpServer};
