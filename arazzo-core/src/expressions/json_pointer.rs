/// An RFC 6901 JSON pointer fragment such as `/items/0/id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    raw: String,
    tokens: Vec<String>,
}

impl JsonPointer {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Unescaped reference tokens; empty for the whole-document pointer.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn parse(fragment: &str) -> Result<Self, JsonPointerError> {
        if fragment.is_empty() {
            return Ok(Self {
                raw: String::new(),
                tokens: Vec::new(),
            });
        }
        let body = fragment
            .strip_prefix('/')
            .ok_or(JsonPointerError::InvalidPrefix)?;

        let tokens = body
            .split('/')
            .map(unescape_token)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: fragment.to_string(),
            tokens,
        })
    }
}

fn unescape_token(token: &str) -> Result<String, JsonPointerError> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(JsonPointerError::InvalidEscape),
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonPointerError {
    #[error("json pointer must start with '/'")]
    InvalidPrefix,
    #[error("json pointer contains invalid escape (only ~0 and ~1 are allowed)")]
    InvalidEscape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_tokens() {
        let p = JsonPointer::parse("/paths/~1pets~1{id}/get").unwrap();
        assert_eq!(p.tokens(), ["paths", "/pets/{id}", "get"]);
        assert_eq!(p.as_str(), "/paths/~1pets~1{id}/get");
    }

    #[test]
    fn rejects_bad_escape_and_prefix() {
        assert_eq!(JsonPointer::parse("/a~2"), Err(JsonPointerError::InvalidEscape));
        assert_eq!(JsonPointer::parse("a/b"), Err(JsonPointerError::InvalidPrefix));
    }
}
