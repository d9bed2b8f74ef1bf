//! Tasks server
//!
//! One process serving the task API over two transports.
//!
//! ## Architecture
//!
//! ```text
//! HTTP client                gRPC client
//!   ↓ (axum, JSON)             ↓ (tonic, Zstd compression)
//! handlers::router           TasksServiceImpl (service.rs)
//!   ↓                          ↓ (proto ↔ domain conversions)
//! TaskService (domain layer)
//!   ↓
//! PgTaskRepository (persistence)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `server`: Server initialization and lifecycle
//! - `service`: gRPC service implementation (TasksServiceImpl)
//! - `conversions`: proto ↔ domain mapping helpers

pub mod conversions;
pub mod server;
pub mod service;

// Re-export for convenience
pub use server::run;
pub use service::TasksServiceImpl;
