use std::fmt;

use http::Method;

/// Where a declared parameter lives in the request (Swagger 2.0 locations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

impl ParameterLocation {
    /// Parse the `in` field of a parameter object.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            "formData" => Some(ParameterLocation::FormData),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Body => write!(f, "body"),
            ParameterLocation::FormData => write!(f, "formData"),
        }
    }
}

/// One declared parameter of an operation, with `$ref` indirection already
/// resolved against the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta {
    pub name: String,
    pub location: ParameterLocation,
    /// Swagger primitive type name (`string`, `integer`, ...). Empty for
    /// body parameters, which carry a schema instead.
    pub ty: String,
    pub required: bool,
}

/// One Swagger operation: an HTTP-method-specific endpoint under a path
/// template, identified by its operationId.
///
/// Built once from the document view when a route resolves; read-only and
/// shared via `Arc` from there on.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationMeta {
    pub method: Method,
    /// The declaring path template, e.g. `/widgets/{id}`
    pub path_pattern: String,
    pub operation_id: String,
    /// Value of the `x-swagger-router-controller` vendor extension, if any.
    /// With explicit controller registration this is a configuration hint for
    /// setup code, never a runtime class-name lookup.
    pub controller: Option<String>,
    /// Declared parameters in declaration order, path-item-level first.
    pub parameters: Vec<ParameterMeta>,
}
