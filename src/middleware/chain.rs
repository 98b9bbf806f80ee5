use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::core::{Middleware, Next};
use crate::error::DispatchError;
use crate::server::{Request, Response};

/// Raised when an already-seeded stack is seeded again. A programming
/// error, surfaced immediately at the call site and never swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackMisuseError;

impl fmt::Display for StackMisuseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the middleware stack can only be seeded once")
    }
}

impl std::error::Error for StackMisuseError {}

/// Ordered, build-once middleware stack with a single entry point.
///
/// Each registration decorates the handler with a closure capturing the
/// head of the stack *at registration time* as its `next` link, then
/// prepends the result. The stack is therefore a pre-linked singly-linked
/// list built head-first: the last-registered middleware executes first and
/// unwinding terminates at the seed entry. Registration order is exactly
/// the reverse of execution order.
///
/// State machine: `Empty -> Seeded(1) -> Built(N)`. The seed entry never
/// changes after seeding and no state permits removal; the stack is
/// prepend-only for the lifetime of one chain instance.
pub struct MiddlewareChain {
    /// Head of the chain at index 0
    stack: Vec<Next>,
}

impl MiddlewareChain {
    /// Create an empty, unseeded chain.
    #[must_use]
    pub fn new() -> Self {
        MiddlewareChain { stack: Vec::new() }
    }

    /// Number of entries, including the seed once present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the chain has been seeded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Seed the stack with its terminal entry.
    ///
    /// Fails with [`StackMisuseError`] if any entry exists already,
    /// regardless of how it got there.
    pub fn seed(&mut self, terminal: Next) -> Result<usize, StackMisuseError> {
        if !self.stack.is_empty() {
            return Err(StackMisuseError);
        }
        self.stack.push(terminal);
        Ok(self.stack.len())
    }

    /// Identity passthrough used when nothing seeded the chain explicitly
    /// before the first registration or execution.
    fn seed_identity(&mut self) {
        debug!("seeding middleware stack with identity terminal");
        self.stack.push(Arc::new(|_request, response| Ok(response)));
    }

    /// Register a handler as the new head of the chain.
    ///
    /// Seeds the stack first if this is the very first registration.
    /// Returns the new stack size.
    pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) -> usize {
        if self.stack.is_empty() {
            self.seed_identity();
        }
        let next = Arc::clone(&self.stack[0]);
        self.stack.insert(0, Self::decorate(middleware, next));
        self.stack.len()
    }

    /// Wrap a handler with its captured `next` link and the return-value
    /// contract check. Decoration happens exactly once, here, at
    /// registration time.
    fn decorate(middleware: Arc<dyn Middleware>, next: Next) -> Next {
        Arc::new(move |request, response| {
            let result = middleware.call(request, response, &next)?;
            if !result.is_well_formed() {
                return Err(DispatchError::ContractViolation {
                    detail: format!(
                        "middleware produced a malformed response (status {})",
                        result.status()
                    ),
                });
            }
            Ok(result)
        })
    }

    /// Run the head of the chain against a request/response pair.
    ///
    /// Deterministic, single-threaded, synchronous. Each handler decides
    /// whether to invoke its continuation; an error propagates out through
    /// every decorator unwound so far with no per-middleware recovery.
    pub fn execute(
        &mut self,
        request: Request,
        response: Response,
    ) -> Result<Response, DispatchError> {
        if self.stack.is_empty() {
            self.seed_identity();
        }
        let head = Arc::clone(&self.stack[0]);
        head(request, response)
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}
