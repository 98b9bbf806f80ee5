use std::sync::Arc;

use crate::error::DispatchError;
use crate::server::{Request, Response};

/// The continuation handed to a middleware: the next decorated entry in the
/// chain, fixed at registration time.
///
/// Invoking it consumes the current request/response values and yields the
/// response flowing back out. A middleware that does not invoke it
/// short-circuits everything registered before it.
pub type Next = Arc<dyn Fn(Request, Response) -> Result<Response, DispatchError> + Send + Sync>;

/// A unit of work in the chain.
///
/// Receives the latest request/response values plus the captured `next`
/// continuation, and decides whether and when to continue down the chain.
/// Any replacement values it produces must be passed to `next` explicitly;
/// the chain does not thread state behind the handler's back.
pub trait Middleware: Send + Sync {
    /// Process the request, optionally delegating to `next`.
    fn call(
        &self,
        request: Request,
        response: Response,
        next: &Next,
    ) -> Result<Response, DispatchError>;
}

impl<F> Middleware for F
where
    F: Fn(Request, Response, &Next) -> Result<Response, DispatchError> + Send + Sync,
{
    fn call(
        &self,
        request: Request,
        response: Response,
        next: &Next,
    ) -> Result<Response, DispatchError> {
        self(request, response, next)
    }
}
