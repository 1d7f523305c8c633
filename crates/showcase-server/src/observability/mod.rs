//! # Observability Module
//!
//! - **Structured Logging**: pretty or JSON logs through `tracing-subscriber`
//! - **Request Tracing**: request ID propagation across every handler
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use showcase_server::observability::{init_logging, request_id_layer, LogFormat};
//!
//! init_logging("info", LogFormat::Pretty);
//!
//! let app: Router<()> = Router::new()
//!     .layer(request_id_layer());
//! ```

mod logging;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use middleware::{request_id_layer, MiddlewareLayer, RequestId, REQUEST_ID_HEADER};
