//! Route resolution: path-template matching and operation lookup against the
//! Swagger document, in declaration order, first match wins.

mod matcher;
mod resolver;

pub use matcher::match_path;
pub use resolver::{Resolution, RouteMatch, RouteResolver, API_DOCS_PATH};
