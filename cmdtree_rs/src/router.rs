//! Command routing: walk the tree over positional tokens.
//!
//! Routing never fails with an error. A miss is data: `failed_at` carries the
//! first unmatched token and `stopped_at` the group it failed in, so callers
//! can offer a did-you-mean suggestion (see [`crate::suggest`]). Running out
//! of tokens on a group is the distinct "reached a group, no subcommand
//! chosen" outcome - callers show group help there, not a typo suggestion.

use tracing::debug;

use crate::tree::{Command, CommandTree, Group, Node};

/// Outcome of resolving a positional token list against the tree.
///
/// Exactly one of `command` (success) or `failed_at` (miss) is meaningful;
/// both are `None` when resolution stopped cleanly at a group with no
/// further tokens.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// Canonical names walked from the root, aliases resolved.
    pub command_path: Vec<String>,
    /// The resolved command, when routing reached a leaf.
    pub command: Option<&'a Command>,
    /// The node routing stopped on: the command on success, otherwise the
    /// deepest group reached. Feeds suggestions and group help.
    pub stopped_at: &'a Node,
    /// Positional tokens left over after routing, in original order.
    pub remaining: Vec<String>,
    /// The first token that matched neither a child name nor an alias.
    pub failed_at: Option<String>,
}

/// Resolve positional tokens against the tree, left to right.
///
/// Direct child-name matches always win over alias matches. A command stops
/// routing immediately: commands are leaves, and their remaining tokens are
/// the raw argument tail, never subcommand names.
pub fn resolve<'a>(tree: &'a CommandTree, positionals: &[String]) -> Resolution<'a> {
    let mut node = tree.root();
    let mut command_path = Vec::new();
    let mut index = 0;

    loop {
        match node {
            Node::Command(command) => {
                return Resolution {
                    command_path,
                    command: Some(command),
                    stopped_at: node,
                    remaining: positionals[index..].to_vec(),
                    failed_at: None,
                };
            }
            Node::Group(group) => {
                let Some(token) = positionals.get(index) else {
                    // Clean stop: group reached, no subcommand chosen.
                    return Resolution {
                        command_path,
                        command: None,
                        stopped_at: node,
                        remaining: Vec::new(),
                        failed_at: None,
                    };
                };
                match lookup_child(group, token) {
                    Some((name, child)) => {
                        command_path.push(name.to_string());
                        node = child;
                        index += 1;
                    }
                    None => {
                        debug!(token = %token, depth = command_path.len(), "routing miss");
                        return Resolution {
                            command_path,
                            command: None,
                            stopped_at: node,
                            remaining: positionals[index..].to_vec(),
                            failed_at: Some(token.clone()),
                        };
                    }
                }
            }
        }
    }
}

/// Find the child a token selects: direct name first, then command aliases
/// across the group's children. Returns the canonical child name.
fn lookup_child<'a>(group: &'a Group, token: &str) -> Option<(&'a str, &'a Node)> {
    if let Some((name, child)) = group.children.get_key_value(token) {
        return Some((name.as_str(), child));
    }
    for (name, child) in &group.children {
        if let Node::Command(command) = child
            && command.meta.aliases.iter().any(|alias| alias == token)
        {
            return Some((name.as_str(), child));
        }
    }
    None
}

/// Best-effort walk over raw (unsplit) tokens, used by completion.
///
/// Differences from [`resolve`]: flag tokens are skipped, and a flag that
/// would take a value swallows the next token too, so an option value that
/// happens to look like a subcommand name cannot confuse routing. Value
/// swallowing is disabled once a command is reached (commands have no
/// subcommand children to confuse) and when the candidate value itself looks
/// like a flag. A routing miss stops descent instead of failing.
pub(crate) fn walk_best_effort<'a>(root: &'a Node, tokens: &[String]) -> (Vec<String>, &'a Node) {
    let mut node = root;
    let mut path = Vec::new();
    let mut index = 0;
    let mut verbatim = false;

    while index < tokens.len() {
        let token = &tokens[index];

        if !verbatim && token == "--" {
            verbatim = true;
            index += 1;
            continue;
        }

        if !verbatim && token.starts_with('-') {
            index += 1;
            if flag_takes_value(token)
                && node.is_group()
                && tokens.get(index).is_some_and(|next| !next.starts_with('-'))
            {
                index += 1;
            }
            continue;
        }

        match node {
            // Commands consume no routing tokens; the rest is argument tail.
            Node::Command(_) => break,
            Node::Group(group) => match lookup_child(group, token) {
                Some((name, child)) => {
                    path.push(name.to_string());
                    node = child;
                    index += 1;
                }
                None => break,
            },
        }
    }

    (path, node)
}

/// Whether a flag token would consume the next token as its value:
/// long or single-letter form, no inline `=`, not a `--no-` negation,
/// not a bundled group.
fn flag_takes_value(token: &str) -> bool {
    if token.contains('=') {
        return false;
    }
    if let Some(body) = token.strip_prefix("--") {
        return !body.is_empty() && !body.starts_with("no-");
    }
    let body = &token[1..];
    body.chars().count() == 1
}

// ============================================================================
// Tests
// ============================================================================
