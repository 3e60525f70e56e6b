mod component_ref;
mod json_pointer;
mod runtime;
mod template;

pub use component_ref::{ComponentRef, ComponentSection};
pub use json_pointer::{JsonPointer, JsonPointerError};
pub use runtime::{parse_runtime_expr, NamePath, NamedRoot, RuntimeExpr, RuntimeExprError, Source};
pub use template::{parse_template, validate_value_expressions, Segment, Template, TemplateError};
