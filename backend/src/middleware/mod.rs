//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns: trace identifiers and
//! request logging, plus CORS headers and preflight handling.

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::Trace;
