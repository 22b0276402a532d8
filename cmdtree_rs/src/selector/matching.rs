//! Step-sequence matching against the command tree.
//!
//! Matching is pure and stable: the same tree and steps always produce the
//! same ordered match list. Order follows declared child order, depth-first
//! for recursive descent.

use tracing::trace;

use super::parse::Step;
use crate::tree::{CommandTree, Node};

/// One selector hit: the path walked from the root and the node found there.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub path: Vec<String>,
    pub node: &'a Node,
}

/// Run a parsed step sequence over the tree.
///
/// Starts from the singleton root match and narrows/expands step by step.
/// A branch with no match simply drops out; the result is the union across
/// surviving branches and may be empty.
pub fn find_matches<'a>(tree: &'a CommandTree, steps: &[Step]) -> Vec<Match<'a>> {
    let mut current = vec![Match {
        path: Vec::new(),
        node: tree.root(),
    }];

    for step in steps {
        let mut next = Vec::new();
        for matched in &current {
            apply_step(matched, step, &mut next);
        }
        trace!(matches = next.len(), ?step, "selector step applied");
        current = next;
    }

    current
}

fn apply_step<'a>(matched: &Match<'a>, step: &Step, out: &mut Vec<Match<'a>>) {
    match step {
        Step::Key(name) => push_key(matched, name, out),
        Step::Set(names) => {
            for name in names {
                push_key(matched, name, out);
            }
        }
        Step::Wildcard => {
            // Commands have no children: a wildcard past a command yields
            // nothing from that branch.
            if let Some(children) = matched.node.children() {
                for (name, child) in children {
                    out.push(extend(matched, name, child));
                }
            }
        }
        Step::Recursive => push_subtree(matched.path.clone(), matched.node, out),
    }
}

fn push_key<'a>(matched: &Match<'a>, name: &str, out: &mut Vec<Match<'a>>) {
    if let Some(children) = matched.node.children()
        && let Some((key, child)) = children.get_key_value(name)
    {
        out.push(extend(matched, key, child));
    }
}

fn extend<'a>(matched: &Match<'a>, name: &str, child: &'a Node) -> Match<'a> {
    let mut path = matched.path.clone();
    path.push(name.to_string());
    Match { path, node: child }
}

/// Emit a node and every descendant, depth-first in declared child order.
/// The starting node itself is included: `..` from a point covers the point.
fn push_subtree<'a>(path: Vec<String>, node: &'a Node, out: &mut Vec<Match<'a>>) {
    out.push(Match {
        path: path.clone(),
        node,
    });
    if let Some(children) = node.children() {
        for (name, child) in children {
            let mut child_path = path.clone();
            child_path.push(name.clone());
            push_subtree(child_path, child, out);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
