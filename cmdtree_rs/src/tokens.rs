//! Flag/positional token parser.
//!
//! Single left-to-right pass over the raw argument vector, no backtracking,
//! no knowledge of the command tree. Every token is classified exactly once
//! as a flag name, a flag value, or a positional. The parser never fails:
//! malformed input degrades to best-effort classification.
//!
//! Classification rules, in priority order at each position:
//!
//! 1. literal `--`: everything after is positional verbatim
//! 2. `--no-<name>`: boolean `false`, no value consumed
//! 3. `--<name>=<value>` (name may be dotted): inline value, coerced
//! 4. `--<name>`: next token is the value unless it starts with `-`,
//!    otherwise boolean `true`
//! 5. `-x`: same value-or-boolean rule, keyed by the single character
//! 6. `-abc`: bundled booleans, one flag per character, never takes a value
//! 7. anything else: positional

use heck::ToLowerCamelCase;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Result of one parsing pass over an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedTokens {
    /// Canonical flag name (camelCase) to value. Dotted flags build nested
    /// objects; repeated flags accumulate into arrays.
    pub flags: Map<String, Value>,
    /// Non-flag tokens in original order, excluding the `--` separator and
    /// tokens consumed as flag values.
    pub positionals: Vec<String>,
    /// The unmodified input, kept for diagnostics and handler metadata.
    pub raw: Vec<String>,
}

/// Parse a raw token list into flags and positionals. Pure and deterministic.
pub fn parse(tokens: &[String]) -> ParsedTokens {
    let mut flags = Map::new();
    let mut positionals = Vec::new();

    let mut i = 0;
    let mut verbatim = false;
    while i < tokens.len() {
        let token = &tokens[i];

        if verbatim {
            positionals.push(token.clone());
            i += 1;
            continue;
        }

        if token == "--" {
            verbatim = true;
            i += 1;
            continue;
        }

        if let Some(body) = token.strip_prefix("--") {
            if body.is_empty() {
                // unreachable: bare "--" handled above
                i += 1;
                continue;
            }

            // --no-<name> negation, only when no inline value is present
            if let Some(name) = body.strip_prefix("no-")
                && !body.contains('=')
                && !name.is_empty()
            {
                assign(&mut flags, &flag_path(name), Value::Bool(false));
                i += 1;
                continue;
            }

            // --<name>=<value>, split on the first '='
            if let Some(eq) = body.find('=') {
                let (name, value) = body.split_at(eq);
                if name.is_empty() {
                    positionals.push(token.clone());
                } else {
                    assign(&mut flags, &flag_path(name), coerce(&value[1..]));
                }
                i += 1;
                continue;
            }

            // --<name>, value in the next token unless it looks like a flag
            let path = flag_path(body);
            if let Some(next) = tokens.get(i + 1)
                && !next.starts_with('-')
            {
                assign(&mut flags, &path, coerce(next));
                i += 2;
            } else {
                assign(&mut flags, &path, Value::Bool(true));
                i += 1;
            }
            continue;
        }

        if let Some(body) = token.strip_prefix("-")
            && !body.is_empty()
            && body.chars().all(|c| c.is_ascii_alphanumeric())
        {
            if body.chars().count() == 1 {
                // -x: same value-or-boolean rule as long flags
                if let Some(next) = tokens.get(i + 1)
                    && !next.starts_with('-')
                {
                    assign(&mut flags, &[body.to_string()], coerce(next));
                    i += 2;
                } else {
                    assign(&mut flags, &[body.to_string()], Value::Bool(true));
                    i += 1;
                }
            } else {
                // -abc: independent booleans, this form never takes a value.
                // Alphanumeric on purpose: `-10` bundles to flags `1` and `0`
                // (see the negative-number note on `coerce`).
                for ch in body.chars() {
                    assign(&mut flags, &[ch.to_string()], Value::Bool(true));
                }
                i += 1;
            }
            continue;
        }

        positionals.push(token.clone());
        i += 1;
    }

    ParsedTokens {
        flags,
        positionals,
        raw: tokens.to_vec(),
    }
}

/// Split a (possibly dotted) flag name into camelCase path segments.
/// `db.max-conns` becomes `["db", "maxConns"]`.
fn flag_path(name: &str) -> Vec<String> {
    name.split('.')
        .map(|segment| segment.to_lower_camel_case())
        .collect()
}

/// Lexical value coercion: strict numeric strings become numbers,
/// `true`/`false` become booleans, everything else stays a string.
/// `"1.0.0"` fails numeric parse and stays a string. A value starting
/// with `-` never reaches coercion from the bare `--flag value` form
/// (it must be written `--flag=-10`); without `=` the token is parsed
/// as flags instead.
fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    // Reject "inf"/"nan" spellings that f64::from_str would accept:
    // coercion is purely lexical.
    if raw.chars().any(|c| c.is_ascii_digit())
        && let Ok(float) = raw.parse::<f64>()
        && float.is_finite()
        && let Some(number) = Number::from_f64(float)
    {
        return Value::Number(number);
    }
    Value::String(raw.to_string())
}

/// Assign `value` at `path` inside the flags object.
///
/// Intermediate segments create (or replace non-object values with) nested
/// objects. A repeated assignment at the same leaf turns the scalar into a
/// two-element array; further repeats append.
fn assign(flags: &mut Map<String, Value>, path: &[String], value: Value) {
    debug_assert!(!path.is_empty());
    let mut map = flags;
    for segment in &path[..path.len() - 1] {
        let slot = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        map = slot.as_object_mut().expect("just ensured object");
    }

    let leaf = path.last().expect("non-empty path");
    match map.get_mut(leaf) {
        None => {
            map.insert(leaf.clone(), value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_long_flag_with_value() {
        let parsed = parse(&argv(&["--name", "john"]));
        assert_eq!(parsed.flags.get("name"), Some(&json!("john")));
        assert!(parsed.positionals.is_empty());
    }

    #[test]
    fn test_long_flag_without_value_is_true() {
        let parsed = parse(&argv(&["--verbose"]));
        assert_eq!(parsed.flags.get("verbose"), Some(&json!(true)));
    }

    #[test]
    fn test_no_prefix_sets_false() {
        let parsed = parse(&argv(&["--no-verbose"]));
        assert_eq!(parsed.flags.get("verbose"), Some(&json!(false)));
    }

    #[test]
    fn test_no_prefix_consumes_no_value() {
        let parsed = parse(&argv(&["--no-color", "red"]));
        assert_eq!(parsed.flags.get("color"), Some(&json!(false)));
        assert_eq!(parsed.positionals, vec!["red"]);
    }

    #[test]
    fn test_equals_form() {
        let parsed = parse(&argv(&["--count=3"]));
        assert_eq!(parsed.flags.get("count"), Some(&json!(3)));
    }

    #[test]
    fn test_kebab_name_normalizes_to_camel() {
        let parsed = parse(&argv(&["--log-level", "info"]));
        assert_eq!(parsed.flags.get("logLevel"), Some(&json!("info")));
    }

    #[test]
    fn test_short_flag_value_and_boolean() {
        let parsed = parse(&argv(&["-o", "out.txt", "-v"]));
        assert_eq!(parsed.flags.get("o"), Some(&json!("out.txt")));
        assert_eq!(parsed.flags.get("v"), Some(&json!(true)));
    }

    #[test]
    fn test_bundled_short_flags() {
        let parsed = parse(&argv(&["-abc"]));
        assert_eq!(parsed.flags.get("a"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("b"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("c"), Some(&json!(true)));
    }

    #[test]
    fn test_bundled_form_never_takes_value() {
        let parsed = parse(&argv(&["-ab", "value"]));
        assert_eq!(parsed.flags.get("a"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("b"), Some(&json!(true)));
        assert_eq!(parsed.positionals, vec!["value"]);
    }

    #[test]
    fn test_separator_forces_positional() {
        let parsed = parse(&argv(&["--force", "--", "--not-a-flag", "-x"]));
        assert_eq!(parsed.flags.get("force"), Some(&json!(true)));
        assert_eq!(parsed.positionals, vec!["--not-a-flag", "-x"]);
    }

    #[test]
    fn test_dot_path_builds_nested_object() {
        let parsed = parse(&argv(&["--db.host", "localhost", "--db.port", "5432"]));
        assert_eq!(
            parsed.flags.get("db"),
            Some(&json!({"host": "localhost", "port": 5432}))
        );
    }

    #[test]
    fn test_repeated_flag_accumulates_in_order() {
        let parsed = parse(&argv(&["--tag", "x", "--tag", "y", "--tag", "z"]));
        assert_eq!(parsed.flags.get("tag"), Some(&json!(["x", "y", "z"])));
    }

    #[test]
    fn test_repeated_dotted_flag_accumulates() {
        let parsed = parse(&argv(&["--db.host=a", "--db.host=b"]));
        assert_eq!(parsed.flags.get("db"), Some(&json!({"host": ["a", "b"]})));
    }

    #[test]
    fn test_dot_path_over_scalar_replaces_with_object() {
        let parsed = parse(&argv(&["--db", "1", "--db.host", "x"]));
        assert_eq!(parsed.flags.get("db"), Some(&json!({"host": "x"})));
    }

    #[test]
    fn test_coercion_boolean_and_number() {
        let parsed = parse(&argv(&["--a", "true", "--b", "false", "--c", "1.5"]));
        assert_eq!(parsed.flags.get("a"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("b"), Some(&json!(false)));
        assert_eq!(parsed.flags.get("c"), Some(&json!(1.5)));
    }

    #[test]
    fn test_coercion_is_strictly_lexical() {
        let parsed = parse(&argv(&["--version=1.0.0", "--host", "inf"]));
        assert_eq!(parsed.flags.get("version"), Some(&json!("1.0.0")));
        assert_eq!(parsed.flags.get("host"), Some(&json!("inf")));
    }

    // The documented negative-number quirk: without `=` the number token is
    // itself parsed as flags. Deliberate, pinned behavior - changing it is a
    // breaking change for downstream callers.
    #[test]
    fn test_negative_number_without_equals_bundles() {
        let parsed = parse(&argv(&["--offset", "-10"]));
        assert_eq!(parsed.flags.get("offset"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("1"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("0"), Some(&json!(true)));
        assert!(parsed.positionals.is_empty());
    }

    #[test]
    fn test_negative_number_with_equals_is_a_number() {
        let parsed = parse(&argv(&["--offset=-10"]));
        assert_eq!(parsed.flags.get("offset"), Some(&json!(-10)));
    }

    #[test]
    fn test_every_token_classified_once() {
        let input = argv(&["deploy", "--env", "prod", "-v", "api", "--dry-run"]);
        let parsed = parse(&input);
        assert_eq!(parsed.positionals, vec!["deploy", "api"]);
        assert_eq!(parsed.flags.get("env"), Some(&json!("prod")));
        assert_eq!(parsed.flags.get("v"), Some(&json!(true)));
        assert_eq!(parsed.flags.get("dryRun"), Some(&json!(true)));
        assert_eq!(parsed.raw, input);
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let parsed = parse(&argv(&["-"]));
        assert_eq!(parsed.positionals, vec!["-"]);
        assert!(parsed.flags.is_empty());
    }

    #[test]
    fn test_empty_inline_value_is_empty_string() {
        let parsed = parse(&argv(&["--name="]));
        assert_eq!(parsed.flags.get("name"), Some(&json!("")));
    }

    #[test]
    fn test_parse_is_pure() {
        let input = argv(&["--tag", "x", "pos"]);
        assert_eq!(parse(&input), parse(&input));
    }
}
