use std::io::{self, Write};

use http::StatusCode;

/// Reason phrase written on the status line.
fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Immutable HTTP response value built up as the chain unwinds.
///
/// Same copy-on-write discipline as [`Request`](super::Request): `with_*`
/// builders return a new value that must be threaded forward explicitly.
///
/// The status code is stored as a bare `u16` and only checked when a
/// decorated middleware returns, which is what makes a malformed response
/// expressible (and detectable as a contract violation) at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    /// Declaration order preserved for the wire; values accumulate per name
    headers: Vec<(String, Vec<String>)>,
    body: Vec<u8>,
}

impl Response {
    /// Create an empty 200 response with no headers and no body.
    #[must_use]
    pub fn new() -> Self {
        Response {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Numeric status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase matching the status code.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        status_reason(self.status)
    }

    /// Return a copy of this response with the status replaced.
    ///
    /// The code is not validated here; the middleware chain checks
    /// well-formedness when the producing handler returns.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// All values declared for a header name (case-insensitive).
    #[must_use]
    pub fn header_values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// Comma-joined header value, the way it is written to the wire.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<String> {
        self.header_values(name).map(|values| values.join(", "))
    }

    /// Return a copy of this response with the value appended to the header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, values)) => values.push(value),
            None => self.headers.push((name.to_string(), vec![value])),
        }
        self
    }

    /// Iterate declared headers in declaration order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers
            .iter()
            .map(|(n, values)| (n.as_str(), values.as_slice()))
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body interpreted as UTF-8, lossily.
    #[must_use]
    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Return a copy of this response with the body replaced.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Whether this value is a well-formed HTTP response.
    ///
    /// Checked by the chain decorator on every handler return.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        StatusCode::from_u16(self.status).is_ok()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

/// Sink accepting the final response of a dispatch cycle.
pub trait ResponseSink {
    /// Write the response out, whole-body, no chunking.
    fn write_response(&mut self, response: &Response) -> io::Result<()>;
}

/// Writes a response to any [`Write`] in plain HTTP/1.1 framing: status line,
/// each header name with its comma-joined values, blank line, body verbatim.
pub struct WireWriter<W: Write> {
    out: W,
}

impl<W: Write> WireWriter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        WireWriter { out }
    }

    /// Recover the underlying writer, e.g. a byte buffer in tests.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResponseSink for WireWriter<W> {
    fn write_response(&mut self, response: &Response) -> io::Result<()> {
        write!(
            self.out,
            "HTTP/1.1 {} {}\r\n",
            response.status(),
            response.reason()
        )?;
        for (name, values) in response.headers() {
            write!(self.out, "{}: {}\r\n", name, values.join(", "))?;
        }
        self.out.write_all(b"\r\n")?;
        self.out.write_all(response.body())?;
        self.out.flush()
    }
}
