//! Completion advisor: candidate suggestions for the token being typed.
//!
//! Reuses the router's walking primitive in best-effort mode over the tokens
//! strictly before the cursor, then offers subcommand names, aliases, flag
//! names, or enum values for the flag currently being given a value. The
//! tree and global shape arrive as explicit parameters; there is no ambient
//! state here.

use heck::{ToKebabCase, ToLowerCamelCase};
use tracing::debug;

use crate::router::walk_best_effort;
use crate::schema::{FieldInfo, InputShape};
use crate::tree::{CommandTree, Node};

/// Flags every command answers to, offered alongside declared ones.
pub const BUILT_IN_FLAGS: &[&str] = &["help", "version", "select"];

/// A partial command line and the token position being completed.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub tokens: &'a [String],
    /// Index of the in-progress token. Tokens before it are complete; the
    /// token at it (possibly absent or empty) is the partial being matched.
    pub cursor_index: usize,
}

/// Compute completion candidates for the request.
pub fn complete(
    tree: &CommandTree,
    globals: Option<&dyn InputShape>,
    request: &CompletionRequest<'_>,
) -> Vec<String> {
    let cursor = request.cursor_index.min(request.tokens.len());
    let preceding = &request.tokens[..cursor];
    let current = request
        .tokens
        .get(cursor)
        .map(String::as_str)
        .unwrap_or("");

    let (path, node) = walk_best_effort(tree.root(), preceding);
    debug!(depth = path.len(), partial = %current, "completion context resolved");

    // If the previous token names a non-boolean enum flag, the only sensible
    // candidates are that enumeration's values.
    if let Some(previous) = preceding.last()
        && let Some(flag) = value_taking_flag_name(previous)
        && let Some(field) = find_field(node, globals, &flag)
        && field.type_desc != "boolean"
        && let Some(values) = &field.enum_values
    {
        return values
            .iter()
            .filter(|value| value.starts_with(current))
            .cloned()
            .collect();
    }

    let mut suggestions = Vec::new();

    // Visible subcommands and their aliases.
    if let Node::Group(group) = node {
        for (name, child) in &group.children {
            if child.hidden() {
                continue;
            }
            if name.starts_with(current) {
                suggestions.push(name.clone());
            }
            if let Node::Command(command) = child {
                for alias in &command.meta.aliases {
                    if alias.starts_with(current) {
                        suggestions.push(alias.clone());
                    }
                }
            }
        }
    }

    // Flags: the resolved command's declared fields, then globals, then
    // built-ins, first occurrence of a name wins.
    let mut flag_names: Vec<String> = Vec::new();
    if let Node::Command(command) = node
        && let Some(shape) = &command.input_shape
    {
        flag_names.extend(shape.describe_fields().into_iter().map(|field| field.name));
    }
    if let Some(shape) = globals {
        flag_names.extend(shape.describe_fields().into_iter().map(|field| field.name));
    }
    flag_names.extend(BUILT_IN_FLAGS.iter().map(|name| name.to_string()));

    let mut seen = Vec::new();
    for name in flag_names {
        if seen.contains(&name) {
            continue;
        }
        let rendered = format!("--{}", name.to_kebab_case());
        if rendered.starts_with(current) {
            suggestions.push(rendered);
        }
        seen.push(name);
    }

    suggestions
}

/// Canonical (camelCase) name of a flag token that would consume the next
/// token as its value; `None` for inline-`=`, negation, bundled, and
/// non-flag tokens.
fn value_taking_flag_name(token: &str) -> Option<String> {
    if token.contains('=') {
        return None;
    }
    if let Some(body) = token.strip_prefix("--") {
        if body.is_empty() || body.starts_with("no-") {
            return None;
        }
        return Some(body.to_lower_camel_case());
    }
    let body = token.strip_prefix('-')?;
    if body.chars().count() == 1 && body.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(body.to_string());
    }
    None
}

/// Look a field up by canonical name in the resolved command's shape, then
/// in the global shape.
fn find_field(
    node: &Node,
    globals: Option<&dyn InputShape>,
    name: &str,
) -> Option<FieldInfo> {
    if let Node::Command(command) = node
        && let Some(shape) = &command.input_shape
        && let Some(field) = shape
            .describe_fields()
            .into_iter()
            .find(|field| field.name == name)
    {
        return Some(field);
    }
    globals?
        .describe_fields()
        .into_iter()
        .find(|field| field.name == name)
}

// ============================================================================
// Tests
// ============================================================================
