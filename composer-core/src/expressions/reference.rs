use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A segment is any run of text without a dot or reference markers. Step
/// names are free-form, so `Create User_id` must stay addressable.
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.${}]+$").expect("valid regex"));

const OPEN: &str = "${";
const CLOSE: &str = "}";

/// Optional leading segment naming the run context itself.
pub const CONTEXT_ROOT: &str = "ctx";

/// A parsed `${ctx.key.field}` reference into the run context.
///
/// The first segment after the optional `ctx` root names a context key; any
/// further segments walk into object fields (or array indexes) of that value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    key: String,
    rest: Vec<String>,
}

impl Reference {
    /// Whether `s` has the `${...}` shape. Says nothing about the inner path.
    pub fn is_reference(s: &str) -> bool {
        s.len() >= OPEN.len() + CLOSE.len() && s.starts_with(OPEN) && s.ends_with(CLOSE)
    }

    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        if !Self::is_reference(s) {
            return Err(ReferenceError::MissingMarkers);
        }
        Self::parse_path(&s[OPEN.len()..s.len() - CLOSE.len()])
    }

    /// Parse the text between the markers, e.g. `ctx.user_id` or `user.name`.
    pub fn parse_path(inner: &str) -> Result<Self, ReferenceError> {
        let inner = inner.trim();
        if inner.is_empty() {
            return Err(ReferenceError::EmptyPath);
        }

        let mut segments = Vec::new();
        for seg in inner.split('.') {
            if seg.trim().is_empty() {
                return Err(ReferenceError::EmptySegment(inner.to_string()));
            }
            if !SEGMENT_RE.is_match(seg) {
                return Err(ReferenceError::InvalidSegment(seg.to_string()));
            }
            segments.push(seg.to_string());
        }

        if segments.first().map(String::as_str) == Some(CONTEXT_ROOT) {
            segments.remove(0);
        }
        if segments.is_empty() {
            return Err(ReferenceError::EmptyPath);
        }

        let key = segments.remove(0);
        Ok(Self {
            key,
            rest: segments,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rest(&self) -> &[String] {
        &self.rest
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OPEN}{CONTEXT_ROOT}.{}", self.key)?;
        for seg in &self.rest {
            write!(f, ".{seg}")?;
        }
        f.write_str(CLOSE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference must be wrapped in ${{...}}")]
    MissingMarkers,
    #[error("reference path must name a context key")]
    EmptyPath,
    #[error("reference path contains an empty segment: {0}")]
    EmptySegment(String),
    #[error("invalid reference segment: {0}")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ctx_rooted_reference() {
        let r = Reference::parse("${ctx.user_id}").unwrap();
        assert_eq!(r.key(), "user_id");
        assert!(r.rest().is_empty());
    }

    #[test]
    fn parses_bare_dotted_path() {
        let r = Reference::parse("${createUser.profile.email}").unwrap();
        assert_eq!(r.key(), "createUser");
        assert_eq!(r.rest(), &["profile".to_string(), "email".to_string()]);
    }

    #[test]
    fn display_is_canonical() {
        let r = Reference::parse("${ user.name }").unwrap();
        assert_eq!(r.to_string(), "${ctx.user.name}");
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(Reference::parse("${}"), Err(ReferenceError::EmptyPath));
        assert_eq!(Reference::parse("${ctx}"), Err(ReferenceError::EmptyPath));
        assert_eq!(Reference::parse("user_id"), Err(ReferenceError::MissingMarkers));
        assert!(matches!(
            Reference::parse("${ctx..id}"),
            Err(ReferenceError::EmptySegment(_))
        ));
        assert!(matches!(
            Reference::parse("${ctx. .id}"),
            Err(ReferenceError::EmptySegment(_))
        ));
        assert!(matches!(
            Reference::parse("${ctx.a{b}"),
            Err(ReferenceError::InvalidSegment(_))
        ));
        assert!(matches!(
            Reference::parse("${ctx.${user_id}}"),
            Err(ReferenceError::InvalidSegment(_))
        ));
    }

    #[test]
    fn free_form_step_names_are_plain_keys() {
        let r = Reference::parse("${ctx.Create User_id}").unwrap();
        assert_eq!(r.key(), "Create User_id");
        assert!(r.rest().is_empty());

        // Looked up verbatim, never evaluated.
        let r = Reference::parse("${__import__('os')}").unwrap();
        assert_eq!(r.key(), "__import__('os')");
    }

    #[test]
    fn shape_check_needs_both_markers() {
        assert!(Reference::is_reference("${a}"));
        assert!(!Reference::is_reference("${a"));
        assert!(!Reference::is_reference("a}"));
        assert!(!Reference::is_reference("$}"));
    }
}
