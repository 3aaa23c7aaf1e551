//! Error types for Herald.
//!
//! This crate provides the foundation error types used throughout the Herald workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use herald_error::{HeraldResult, TransportError, TransportErrorKind};
//!
//! fn deliver() -> HeraldResult<()> {
//!     Err(TransportError::new(TransportErrorKind::SendFailed("gateway closed".to_string())))?
//! }
//!
//! match deliver() {
//!     Ok(()) => println!("Delivered"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod store;
mod transport;

pub use config::ConfigError;
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use json::JsonError;
pub use store::{StoreError, StoreErrorKind};
pub use transport::{TransportError, TransportErrorKind};
