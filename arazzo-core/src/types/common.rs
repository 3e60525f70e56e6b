use std::collections::BTreeMap;

pub type AnyValue = serde_json::Value;
pub type JsonSchema = serde_json::Value;
pub type RuntimeExpression = String;

/// Extension bag: every key an entity does not model, kept verbatim.
///
/// Decoding captures all unknown keys here; the validator later insists on the `x-` prefix.
pub type Extensions = BTreeMap<String, serde_json::Value>;
