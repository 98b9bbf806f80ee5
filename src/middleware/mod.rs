//! The onion-style middleware chain and the built-in middleware the
//! dispatcher registers: header normalization, type casting, validation and
//! Swagger-backed routing.

mod caster;
mod chain;
mod core;
mod header;
mod router;
mod validation;

pub use caster::CasterMiddleware;
pub use chain::{MiddlewareChain, StackMisuseError};
pub use core::{Middleware, Next};
pub use header::HeaderMiddleware;
pub use router::RouterMiddleware;
pub use validation::ValidationMiddleware;
