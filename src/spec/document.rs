use serde_json::{Map, Value};
use tracing::debug;

use super::types::{OperationMeta, ParameterLocation, ParameterMeta};
use crate::error::ConfigError;
use http::Method;

/// Guard against `$ref` cycles when chasing parameter indirections.
const MAX_REF_HOPS: usize = 8;

/// Read-only view over a parsed Swagger document.
///
/// The view never mutates the document and never fails during matching: an
/// operation or parameter that cannot be interpreted is simply skipped, so
/// one unmatchable declaration cannot abort the resolution loop.
///
/// Declaration order of `paths` is preserved (`serde_json` is built with
/// `preserve_order`); route resolution depends on it.
#[derive(Debug, Clone)]
pub struct SwaggerSpec {
    root: Value,
}

impl SwaggerSpec {
    /// Wrap a parsed document, checking the minimal shape the dispatcher
    /// relies on: a JSON object with a `paths` object.
    pub fn new(root: Value) -> Result<Self, ConfigError> {
        if !root.is_object() {
            return Err(ConfigError::InvalidDocument {
                detail: "document root must be a JSON object".to_string(),
            });
        }
        match root.get("paths") {
            Some(paths) if paths.is_object() => Ok(SwaggerSpec { root }),
            Some(_) => Err(ConfigError::InvalidDocument {
                detail: "'paths' must be an object".to_string(),
            }),
            None => Err(ConfigError::InvalidDocument {
                detail: "document declares no 'paths'".to_string(),
            }),
        }
    }

    /// The raw document, byte-for-byte what was fed in (modulo key ordering).
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.root
    }

    /// Consume the view, yielding the raw document back.
    #[must_use]
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Iterate path templates and their path items in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|paths| {
                paths
                    .iter()
                    .filter_map(|(template, item)| Some((template, item.as_object()?)))
            })
    }

    /// Look up the operation declared for `method` under `template`.
    ///
    /// Method names are matched case-insensitively by lower-casing. Returns
    /// `None` when the path, the method, or the operationId is missing; the
    /// caller treats all three as "try the next candidate".
    #[must_use]
    pub fn operation(&self, template: &str, method: &Method) -> Option<OperationMeta> {
        let item = self
            .root
            .get("paths")
            .and_then(|p| p.get(template))
            .and_then(Value::as_object)?;
        let key = method.as_str().to_ascii_lowercase();
        let op = item.get(&key).and_then(Value::as_object)?;

        let operation_id = match op.get("operationId").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                debug!(template, method = %method, "operation declares no operationId, skipping");
                return None;
            }
        };
        let controller = op
            .get("x-swagger-router-controller")
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut parameters = self.collect_parameters(item.get("parameters"));
        parameters.extend(self.collect_parameters(op.get("parameters")));

        Some(OperationMeta {
            method: method.clone(),
            path_pattern: template.to_string(),
            operation_id,
            controller,
            parameters,
        })
    }

    /// Parameters declared at the path-item level for `template`, used for
    /// structural matching when the requested method is not declared there.
    #[must_use]
    pub fn path_level_parameters(&self, template: &str) -> Vec<ParameterMeta> {
        let raw = self
            .root
            .get("paths")
            .and_then(|p| p.get(template))
            .and_then(|item| item.get("parameters"));
        self.collect_parameters(raw)
    }

    fn collect_parameters(&self, raw: Option<&Value>) -> Vec<ParameterMeta> {
        raw.and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|param| self.parameter_meta(param))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Interpret one parameter object, chasing `$ref` indirection into the
    /// document. An unresolvable reference yields `None` rather than an
    /// error, so an unmatchable declaration falls through silently.
    fn parameter_meta(&self, raw: &Value) -> Option<ParameterMeta> {
        let mut current = raw;
        for _ in 0..MAX_REF_HOPS {
            match current.get("$ref").and_then(Value::as_str) {
                Some(reference) => match self.resolve_ref(reference) {
                    Some(target) => current = target,
                    None => {
                        debug!(reference, "unresolvable parameter $ref, skipping");
                        return None;
                    }
                },
                None => break,
            }
        }

        let obj = current.as_object()?;
        let name = obj.get("name").and_then(Value::as_str)?.to_string();
        let location = obj
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::parse)?;
        let ty = obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let required = obj
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Some(ParameterMeta {
            name,
            location,
            ty,
            required,
        })
    }

    /// Resolve a local `#/...` JSON reference against the document.
    #[must_use]
    pub fn resolve_ref(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        self.root.pointer(pointer)
    }
}
