//! # Validation
//!
//! The network seam: everything that talks to (or stands in for) the
//! remote DAX validation service.
//!
//! - [`validator`]: the `Validator` trait and its error type
//! - [`http`]: the reqwest-backed implementation of the wire protocol
//! - [`types`]: request body, verdict summary, pretty printing
//! - [`sanity`]: offline quick check, never sent over the wire

pub mod http;
pub mod sanity;
pub mod types;
pub mod validator;

pub use http::HttpValidator;
pub use sanity::{Finding, QuickCheck};
pub use types::{ValidationRequest, Verdict, pretty};
pub use validator::{ValidationError, Validator};
