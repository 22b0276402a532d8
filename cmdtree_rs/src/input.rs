//! Candidate-input assembly: merge parsed flags with consumed positionals.
//!
//! The output object is what the external validator checks. Field order of
//! operations matters and is part of the compatibility contract: flags are
//! copied first, positional assignments come after, so on a name collision
//! the positional value wins.

use serde_json::{Map, Value};

use crate::tree::{PositionalArg, check_variadic_placement};
use crate::error::ConfigError;

/// Reserved key for positional tokens beyond the declared arguments.
/// They are kept here rather than silently dropped.
pub const OVERFLOW_KEY: &str = "_";

/// Merge flags and leftover positionals into the candidate input object.
///
/// Each declared positional argument, in order, takes the corresponding
/// token under its (marker-stripped) name. A trailing variadic declaration
/// absorbs every remaining token as a list. The variadic-placement check is
/// repeated here so direct callers that bypass [`crate::tree::CommandTree`]
/// still hit the configuration error on first use.
pub fn build(
    flags: &Map<String, Value>,
    positionals: &[String],
    declarations: &[PositionalArg],
) -> Result<Map<String, Value>, ConfigError> {
    check_variadic_placement(declarations)?;

    let mut candidate = flags.clone();
    let mut index = 0;

    for declaration in declarations {
        if declaration.variadic {
            let rest: Vec<Value> = positionals[index..]
                .iter()
                .map(|token| Value::String(token.clone()))
                .collect();
            candidate.insert(strip_marker(&declaration.name), Value::Array(rest));
            index = positionals.len();
        } else if let Some(token) = positionals.get(index) {
            candidate.insert(strip_marker(&declaration.name), Value::String(token.clone()));
            index += 1;
        }
        // A missing token leaves the field unset; the validator reports it.
    }

    if index < positionals.len() {
        let overflow: Vec<Value> = positionals[index..]
            .iter()
            .map(|token| Value::String(token.clone()))
            .collect();
        candidate.insert(OVERFLOW_KEY.to_string(), Value::Array(overflow));
    }

    Ok(candidate)
}

/// Strip a `...` variadic marker from a declared argument name, wherever
/// the caller chose to write it (`...files` or `files...`).
fn strip_marker(name: &str) -> String {
    name.trim_matches('.').to_string()
}

// ============================================================================
// Tests
// ============================================================================
