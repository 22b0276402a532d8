//! Capability interface for input-shape validation and introspection.
//!
//! The engine never validates anything itself: a command declares an opaque
//! shape handle and the embedding layer plugs in whatever validation library
//! it likes behind [`InputShape`]. The engine only needs two things from a
//! shape: turn a candidate object into a typed value (or issues), and list
//! its fields so completion and introspection can see flag names, defaults,
//! and enumerations.

use serde::Serialize;
use serde_json::Value;

/// One segment of a validation-issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Issue classification. `Missing` corresponds to the validator's
/// "expected non-undefined" complaint and is rendered as a required-field
/// error by callers; everything else is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Missing,
    Invalid,
}

/// A single validation issue reported by the external validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Path segments from the candidate root to the offending field.
    pub path: Vec<PathSegment>,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    /// A missing/required-field issue at the given path.
    pub fn missing(path: Vec<PathSegment>) -> Self {
        Self {
            path,
            kind: IssueKind::Missing,
            message: "required".to_string(),
        }
    }

    /// Any other validation failure at the given path.
    pub fn invalid(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            kind: IssueKind::Invalid,
            message: message.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.kind == IssueKind::Missing
    }

    /// Render the path as a dotted field identifier for error display.
    /// Keys join with `.`, array indexes render as `[n]`:
    /// `[db, hosts, 0, port]` becomes `db.hosts[0].port`.
    pub fn dotted_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    out.push_str(&format!("[{index}]"));
                }
            }
        }
        out
    }
}

/// Introspection record for one declared field of an input shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInfo {
    /// Canonical (camelCase) field name, matching parsed flag keys.
    pub name: String,
    /// Human-readable type description (e.g. `string`, `number`, `boolean`).
    pub type_desc: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Literal values when the field is an enumeration. The completion
    /// advisor uses this to suggest values for the flag being typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, type_desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_desc: type_desc.into(),
            optional: false,
            default: None,
            description: None,
            enum_values: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Pluggable validation/introspection capability for a command's input.
///
/// Implementations wrap a concrete schema library; the engine treats the
/// handle as opaque and only calls through this interface.
pub trait InputShape: Send + Sync {
    /// Validate a candidate input object, returning the typed value or the
    /// list of field issues.
    fn validate(&self, candidate: &Value) -> Result<Value, Vec<Issue>>;

    /// Ordered list of the shape's declared fields.
    fn describe_fields(&self) -> Vec<FieldInfo>;
}

// ============================================================================
// Tests
// ============================================================================
