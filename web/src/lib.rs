//! Axum HTTP front end for the todo engine.
//!
//! The handlers are a thin shell: they parse the request, call
//! [`todo::TodoService`], and map the result to HTTP.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives and is tagged with an `x-request-id`
//! 2. **Extract data** from path, query string or JSON body
//! 3. **Call** the matching `TodoService` operation
//! 4. **Map result** to a status code and JSON body
//!
//! | Outcome | Status |
//! |---|---|
//! | created | 201 |
//! | deleted | 204 |
//! | validation error, business rule violation, malformed request | 400 |
//! | unknown or unparsable id | 404 |
//! | internal error | 500 |
//!
//! # Example
//!
//! ```no_run
//! use todo::TodoLimits;
//! use todo_web::{AppState, build_router};
//!
//! # async fn run() -> std::io::Result<()> {
//! let app = build_router(AppState::in_memory(TodoLimits::DEFAULT));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use routes::{REQUEST_ID_HEADER, build_router};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
