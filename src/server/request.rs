use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use serde_json::Value;

use crate::spec::OperationMeta;

/// Immutable HTTP request value threaded through the middleware chain.
///
/// Every transformation follows copy-on-write: the `with_*` builders return a
/// new value and leave the original untouched. Whichever component produces a
/// replacement must pass it along explicitly; a middleware that calls
/// `with_attribute` and then hands the *old* request to `next` silently drops
/// the attribute for everything downstream. That propagation discipline is
/// part of the contract, not an accident.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    /// Header names are stored lowercase
    headers: HashMap<String, String>,
    body: Vec<u8>,
    attributes: HashMap<String, Value>,
    operation: Option<Arc<OperationMeta>>,
}

impl Request {
    /// Create a request for the given method and URI path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Request {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            attributes: HashMap::new(),
            operation: None,
        }
    }

    /// HTTP method of the request.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URI path of the request, without query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a header by name (case-insensitive per RFC 7230).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Return a copy of this request with the header set.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Raw request body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Return a copy of this request with the body replaced.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a request attribute, e.g. an extracted path parameter.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All attributes attached so far.
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Return a copy of this request with the attribute attached.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// The Swagger operation resolved for this request, once routing has run.
    #[must_use]
    pub fn operation(&self) -> Option<&Arc<OperationMeta>> {
        self.operation.as_ref()
    }

    /// Return a copy of this request carrying the resolved operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Arc<OperationMeta>) -> Self {
        self.operation = Some(operation);
        self
    }
}

/// Zero-argument factory producing a request from the ambient environment.
///
/// The dispatcher performs no connection-level networking; a server adapter
/// implements this to hand over exactly one parsed request per
/// [`Talus::run`](crate::dispatcher::Talus::run) invocation.
pub trait RequestSource {
    /// Produce the request for the current invocation.
    fn produce(&self) -> Request;
}

impl<F> RequestSource for F
where
    F: Fn() -> Request,
{
    fn produce(&self) -> Request {
        self()
    }
}
