//! # talus
//!
//! **talus** is a minimal HTTP micro-dispatcher driven entirely by a
//! Swagger/OpenAPI document. Incoming requests pass through a classic
//! onion-style middleware chain and are routed to user-registered
//! controllers keyed by operationId.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Swagger document loading and the read-only queryable view
//! - **[`router`]** - path-template matching and route resolution, in
//!   document declaration order, first match wins
//! - **[`middleware`]** - the build-once middleware chain plus the built-in
//!   header, caster, validation and routing middleware
//! - **[`dispatcher`]** - the `Talus` orchestrator: configuration,
//!   controller registry, the single error boundary, collaborator bridging
//! - **[`server`]** - request/response value types and the wire writer
//!
//! ## Request handling flow
//!
//! One `run()` invocation processes one request: the request source
//! collaborator produces a parsed request, the chain executes outermost
//! middleware first (routing, validation, casting, header normalization,
//! then user middleware, then the terminal controller dispatch), and the
//! response unwinds back out through the same middleware before the sink
//! collaborator writes it to the wire. Any failure below the single catch
//! boundary in [`Talus::handle`](dispatcher::Talus::handle) is delegated to
//! the error-handler collaborator.
//!
//! Request and response values are immutable with copy-on-write builders;
//! every replacement must be threaded forward explicitly. Connection-level
//! networking is out of scope: an external HTTP server supplies one request
//! per invocation.
//!
//! ## Quick start
//!
//! ```no_run
//! use talus::{spec::load_spec, Request, Response, Talus};
//!
//! let spec = load_spec("swagger.json").expect("load swagger document");
//! let mut app = Talus::builder().spec(spec).build().expect("configure");
//!
//! app.add_controller("getWidget", |req: Request, res: Response| {
//!     let id = req.attribute("id").and_then(|v| v.as_str()).unwrap_or("");
//!     Ok(res.with_body(format!("widget {id}")))
//! });
//! ```

pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod spec;

pub use dispatcher::{Container, Controller, ErrorHandler, Talus, TalusBuilder};
pub use error::{ConfigError, DispatchError};
pub use middleware::{Middleware, MiddlewareChain, Next, StackMisuseError};
pub use router::{Resolution, RouteMatch, RouteResolver, API_DOCS_PATH};
pub use server::{Request, RequestSource, Response, ResponseSink, WireWriter};
pub use spec::{OperationMeta, ParameterLocation, ParameterMeta, SwaggerSpec};
