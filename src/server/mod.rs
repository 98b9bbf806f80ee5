//! Request/response value types and the wire-output adapter.
//!
//! The dispatcher core treats HTTP messages as immutable values with
//! copy-on-write builders; the only I/O this module owns is the final
//! whole-body write performed by [`WireWriter`].

mod request;
mod response;

pub use request::{Request, RequestSource};
pub use response::{Response, ResponseSink, WireWriter};
