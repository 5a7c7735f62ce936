//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route: the
//! per-request trace identifier and the cross-origin policy.

pub mod cors;
pub mod trace;

pub use cors::cors_policy;
pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
