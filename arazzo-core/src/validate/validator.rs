use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation, ViolationKind};
use crate::types::{ArazzoDocument, Extensions};

use super::rules;

pub(crate) static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid"));
pub(crate) static MAP_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\.\-_]+$").expect("valid"));

#[derive(Debug, Default)]
pub(crate) struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn validate_document(&mut self, doc: &ArazzoDocument) {
        rules::document::validate_document(self, doc);
    }

    pub(crate) fn push(
        &mut self,
        kind: ViolationKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.violations.push(Violation::new(kind, path, message));
    }

    pub(crate) fn validate_spec_version(&mut self, path: &str, version: &str) {
        if version.trim().is_empty() {
            self.push(ViolationKind::Structure, path, "must not be empty");
            return;
        }
        // 1.0.0 and 1.0.1 share a feature set; only major.minor is enforced.
        let mut parts = version.trim().split('.');
        match (parts.next(), parts.next()) {
            (Some("1"), Some("0")) => {}
            (Some(_), Some(_)) => {
                self.push(
                    ViolationKind::Structure,
                    path,
                    "only Arazzo spec 1.0.x is currently supported",
                );
            }
            _ => self.push(
                ViolationKind::Structure,
                path,
                "must be a semver-like string (major.minor[.patch])",
            ),
        }
    }

    pub(crate) fn validate_extensions(&mut self, path: &str, ext: &Extensions) {
        for key in ext.keys().filter(|k| !k.starts_with("x-")) {
            self.push(
                ViolationKind::Extension,
                format!("{path}.{key}"),
                "unknown field (only x-* specification extensions are allowed)",
            );
        }
    }
}
