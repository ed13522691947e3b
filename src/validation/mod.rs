//! # Request Validation
//!
//! Schema-driven validation of the merged request parameter map.
//!
//! Each operation names a [`SchemaId`]; the schema documents live in
//! [`schemas`] and are compiled once with the `jsonschema` crate, then cached
//! in a `DashMap` for concurrent access. Validation works on a coerced copy of
//! the parameters (numeric and boolean strings become typed values) and only
//! hands that copy back when every check passes.

pub mod schemas;

pub use schemas::SchemaId;

use std::sync::Arc;

use dashmap::DashMap;
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::observability::metrics::record_validation_failure;

/// Parameter map as handed over by the dispatcher
pub type Params = Map<String, Value>;

/// Parameters that arrive as strings in paths and query strings but are integers
const INTEGER_FIELDS: &[&str] = &["vlan_id"];

/// Parameters that arrive as strings in query strings but are booleans
const BOOLEAN_FIELDS: &[&str] = &["fabric", "internet_nat"];

/// Message reported for any malformed IPv4 field
pub const IPV4_MESSAGE: &str = "must be an IPv4 address";

lazy_static! {
    /// Properties whose pattern failures are reported as IPv4 errors
    static ref IPV4_PROPERTY_REGEX: Regex =
        Regex::new(r"^(gateway|provision_start_ip|provision_end_ip|resolvers\[[0-3]\])$").unwrap();
}

/// Schema validation failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The parameters violate the schema
    #[error("{}", render_property_message(property.as_deref(), message))]
    Invalid { schema: SchemaId, property: Option<String>, message: String },

    /// The schema document itself does not compile
    #[error("Schema compilation error for '{schema}': {message}")]
    Compilation { schema: SchemaId, message: String },
}

/// `property "<name>": <message>`, or the bare message when no property applies
pub(crate) fn render_property_message(property: Option<&str>, message: &str) -> String {
    match property {
        Some(property) => format!("property \"{}\": {}", property, message),
        None => message.to_string(),
    }
}

/// Validates request parameters against the operation schemas
#[derive(Clone, Default)]
pub struct SchemaValidator {
    compiled: Arc<DashMap<SchemaId, Arc<Validator>>>,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").field("compiled", &self.compiled.len()).finish()
    }
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `raw` against `schema`, returning the normalized parameters.
    ///
    /// The first violation is reported; `raw` is never modified.
    pub fn validate(&self, schema: SchemaId, raw: &Params) -> Result<Params, SchemaError> {
        let validator = self.get_or_compile(schema)?;

        let mut params = raw.clone();
        coerce_scalars(&mut params);
        let instance = Value::Object(params);

        if let Some(error) = validator.iter_errors(&instance).next() {
            let property = property_name(&error.kind, &error.instance_path.to_string());
            let message = match (&error.kind, property.as_deref()) {
                (ValidationErrorKind::Pattern { .. }, Some(p)) if IPV4_PROPERTY_REGEX.is_match(p) => {
                    IPV4_MESSAGE.to_string()
                }
                _ => error.to_string(),
            };
            record_validation_failure(schema.as_str());
            return Err(SchemaError::Invalid { schema, property, message });
        }

        match instance {
            Value::Object(params) => Ok(params),
            _ => unreachable!("instance is built from an object"),
        }
    }

    /// Compile every schema up front so a broken document fails at startup
    pub fn precompile(&self) -> Result<(), SchemaError> {
        for schema in SchemaId::ALL {
            self.get_or_compile(schema)?;
        }
        Ok(())
    }

    fn get_or_compile(&self, schema: SchemaId) -> Result<Arc<Validator>, SchemaError> {
        if let Some(validator) = self.compiled.get(&schema) {
            return Ok(Arc::clone(&validator));
        }

        let validator = Validator::options()
            .with_draft(Draft::Draft7)
            .build(&schema.document())
            .map_err(|e| SchemaError::Compilation { schema, message: e.to_string() })?;

        let validator = Arc::new(validator);
        self.compiled.insert(schema, Arc::clone(&validator));
        Ok(validator)
    }
}

/// Convert string-typed integers and booleans in place; values that do not
/// parse are left alone for the schema to reject
fn coerce_scalars(params: &mut Params) {
    for field in INTEGER_FIELDS {
        let coerced = match params.get(*field) {
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(Value::Number(n)) if n.is_f64() => n.as_f64().and_then(whole_number),
            _ => None,
        };
        if let Some(n) = coerced {
            params.insert(field.to_string(), Value::from(n));
        }
    }

    for field in BOOLEAN_FIELDS {
        if let Some(Value::String(s)) = params.get(*field) {
            let parsed = match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            if let Some(b) = parsed {
                params.insert(field.to_string(), Value::Bool(b));
            }
        }
    }
}

/// `4.0` is an integer to the schema but not to typed deserialization
fn whole_number(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}

/// Name the offending property the way tenants spell it: `gateway`,
/// `resolvers[2]`, `routes.10.0.0.0/8`
fn property_name(kind: &ValidationErrorKind, instance_path: &str) -> Option<String> {
    if let ValidationErrorKind::Required { property } = kind {
        let missing = property.as_str().map(str::to_string).unwrap_or_else(|| property.to_string());
        return Some(if instance_path.is_empty() {
            missing
        } else {
            format!("{}.{}", pointer_to_property(instance_path)?, missing)
        });
    }
    pointer_to_property(instance_path)
}

fn pointer_to_property(pointer: &str) -> Option<String> {
    let mut segments = pointer.split('/').skip(1).map(|s| s.replace("~1", "/").replace("~0", "~"));
    let mut name = segments.next().filter(|s| !s.is_empty())?;
    for segment in segments {
        if segment.chars().all(|c| c.is_ascii_digit()) {
            name.push_str(&format!("[{}]", segment));
        } else {
            name.push('.');
            name.push_str(&segment);
        }
    }
    Some(name)
}
