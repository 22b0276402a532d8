//! Selector string parser.
//!
//! Grammar (informal): a selector is `.`-separated segments from the start
//! of the string. `.` alone selects the root. A bare identifier is a key
//! step, `*` a wildcard, `{a,b}` an explicit set, and a doubled dot (`..`)
//! recursive descent, optionally followed directly by another step.
//!
//! Parse failures are fatal to the single request: empty input, a missing
//! leading dot, a trailing dot with nothing after it, an empty `{}` set, or
//! an unrecognized character where an identifier, `*`, or `{` was expected.

use crate::error::SelectorError;

/// One step of a parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Look up one child by name.
    Key(String),
    /// Expand to all children, one level.
    Wildcard,
    /// Union of explicit keys, in declaration order.
    Set(Vec<String>),
    /// Descend zero or more levels, matching at every depth.
    Recursive,
}

/// Parse a selector string into its step sequence.
pub fn parse_selector(text: &str) -> Result<Vec<Step>, SelectorError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Err(SelectorError::new(0, "empty selector"));
    }
    if chars[0] != '.' {
        return Err(SelectorError::new(0, "selector must start with '.'"));
    }

    let mut steps = Vec::new();
    let mut i = 1;
    loop {
        // Positioned just after a consumed '.' separator.
        if i == chars.len() {
            if i == 1 || matches!(steps.last(), Some(Step::Recursive)) {
                // "." root selector, or trailing dots after recursive descent.
                break;
            }
            return Err(SelectorError::new(i, "trailing '.' with nothing after it"));
        }

        match chars[i] {
            '.' => {
                // Doubled dot: recursive descent. It may be followed directly
                // by the next step, by end of input, or by another dot.
                steps.push(Step::Recursive);
                i += 1;
                if let Some('.') = chars.get(i) {
                    i += 1;
                    continue;
                }
                if i == chars.len() {
                    break;
                }
                // Fall through to the next iteration's segment handling by
                // re-entering the loop without a separator: emulate by
                // parsing the segment now.
                i = parse_segment(&chars, i, &mut steps)?;
                match chars.get(i) {
                    None => break,
                    Some('.') => i += 1,
                    Some(c) => {
                        return Err(SelectorError::new(i, format!("unexpected character '{c}'")));
                    }
                }
            }
            _ => {
                i = parse_segment(&chars, i, &mut steps)?;
                match chars.get(i) {
                    None => break,
                    Some('.') => i += 1,
                    Some(c) => {
                        return Err(SelectorError::new(i, format!("unexpected character '{c}'")));
                    }
                }
            }
        }
    }

    Ok(steps)
}

/// Parse one non-recursive segment starting at `i`; push its step and
/// return the index just past it.
fn parse_segment(chars: &[char], i: usize, steps: &mut Vec<Step>) -> Result<usize, SelectorError> {
    match chars[i] {
        '*' => {
            steps.push(Step::Wildcard);
            Ok(i + 1)
        }
        '{' => {
            let (names, next) = parse_set(chars, i)?;
            steps.push(Step::Set(names));
            Ok(next)
        }
        c if is_ident_char(c) => {
            let mut end = i;
            while end < chars.len() && is_ident_char(chars[end]) {
                end += 1;
            }
            steps.push(Step::Key(chars[i..end].iter().collect()));
            Ok(end)
        }
        c => Err(SelectorError::new(
            i,
            format!("unexpected character '{c}', expected a name, '*', or '{{'"),
        )),
    }
}

/// Parse a `{name, name, ...}` set starting at the opening brace.
/// Whitespace around braces and commas is ignored; the set must be
/// non-empty. Returns the names and the index just past the closing brace.
fn parse_set(chars: &[char], open: usize) -> Result<(Vec<String>, usize), SelectorError> {
    let mut names = Vec::new();
    let mut i = open + 1;
    loop {
        i = skip_whitespace(chars, i);
        match chars.get(i) {
            None => return Err(SelectorError::new(i, "unterminated '{' set")),
            Some('}') if names.is_empty() => {
                return Err(SelectorError::new(i, "empty '{}' set"));
            }
            Some(c) if is_ident_char(*c) => {
                let mut end = i;
                while end < chars.len() && is_ident_char(chars[end]) {
                    end += 1;
                }
                names.push(chars[i..end].iter().collect());
                i = skip_whitespace(chars, end);
                match chars.get(i) {
                    Some(',') => i += 1,
                    Some('}') => return Ok((names, i + 1)),
                    None => return Err(SelectorError::new(i, "unterminated '{' set")),
                    Some(c) => {
                        return Err(SelectorError::new(
                            i,
                            format!("unexpected character '{c}' in set, expected ',' or '}}'"),
                        ));
                    }
                }
            }
            Some(c) => {
                return Err(SelectorError::new(
                    i,
                    format!("unexpected character '{c}' in set, expected a name"),
                ));
            }
        }
    }
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

// ============================================================================
// Tests
// ============================================================================
