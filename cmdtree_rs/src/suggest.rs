//! Did-you-mean suggestions for routing misses.
//!
//! When resolution fails, [`crate::router::Resolution::stopped_at`] holds the
//! group the unmatched token was tried against. This module scans that
//! group's visible child names and aliases for a close Levenshtein match.

use strsim::levenshtein;

use crate::tree::Node;

/// Maximum edit distance considered "similar enough" to suggest.
const MAX_DISTANCE: usize = 2;

/// Suggest the closest child name (or command alias) of `node` to `input`.
/// Returns `None` for commands, for hidden-only groups, and when nothing is
/// within edit distance 2.
pub fn similar_child(node: &Node, input: &str) -> Option<String> {
    let children = node.children()?;
    let input_lower = input.to_lowercase();
    let mut best: Option<(String, usize)> = None;

    let consider = |candidate: &str, best: &mut Option<(String, usize)>| {
        let distance = levenshtein(&input_lower, candidate);
        if distance <= MAX_DISTANCE
            && best.as_ref().is_none_or(|(_, best_distance)| distance < *best_distance)
        {
            *best = Some((candidate.to_string(), distance));
        }
    };

    for (name, child) in children {
        if child.hidden() {
            continue;
        }
        consider(name, &mut best);
        if let Node::Command(command) = child {
            for alias in &command.meta.aliases {
                consider(alias, &mut best);
            }
        }
    }

    best.map(|(name, _)| name)
}

// ============================================================================
// Tests
// ============================================================================
