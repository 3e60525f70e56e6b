use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{AnyValue, RuntimeExpression};

/// A `reference` to an entry under `components`, as written in the document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReusableObject {
    pub reference: RuntimeExpression,

    /// Local override. Only meaningful for parameter references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AnyValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reference<T> {
    pub object: ReusableObject,
    /// Deep copy of the referenced component with local overrides applied.
    /// Filled in by the resolver; never part of the encoded document.
    pub resolved: Option<T>,
}

/// A field that holds either an inline object or a reference into `components`.
///
/// Decoding is decided by key presence: an object carrying a `reference` key is a
/// [`Reusable::Reference`], anything else decodes as [`Reusable::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reusable<T> {
    Literal(T),
    Reference(Reference<T>),
}

impl<T> Reusable<T> {
    pub fn reference(reference: impl Into<String>) -> Self {
        Self::Reference(Reference {
            object: ReusableObject {
                reference: reference.into(),
                value: None,
            },
            resolved: None,
        })
    }

    pub fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference<T>> {
        match self {
            Self::Literal(_) => None,
            Self::Reference(r) => Some(r),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// The inline value, or the resolved copy of a reference once resolution ran.
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Reference(r) => r.resolved.as_ref(),
        }
    }
}

impl<T: Serialize> Serialize for Reusable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(v) => v.serialize(serializer),
            Self::Reference(r) => r.object.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Reusable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Buffer through a JSON value so both input formats take the same path.
        let raw = AnyValue::deserialize(deserializer)?;
        let is_reference = raw
            .as_object()
            .is_some_and(|map| map.contains_key("reference"));

        if is_reference {
            let object = ReusableObject::deserialize(raw).map_err(D::Error::custom)?;
            return Ok(Self::Reference(Reference {
                object,
                resolved: None,
            }));
        }

        T::deserialize(raw)
            .map(Self::Literal)
            .map_err(D::Error::custom)
    }
}
