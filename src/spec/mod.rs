//! Swagger document view: loading, the queryable structure, and the
//! operation/parameter metadata types the router matches against.

mod document;
mod load;
mod types;

pub use document::SwaggerSpec;
pub use load::{load_spec, spec_from_json, spec_from_yaml};
pub use types::{OperationMeta, ParameterLocation, ParameterMeta};
