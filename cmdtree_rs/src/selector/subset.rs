//! Pruned-copy construction from a match set.
//!
//! `subset` materializes matches back into a new tree containing only the
//! branches that lead to each match, with every matched node's own subtree
//! clipped to a depth limit. The original tree is never touched; the output
//! is structurally independent (shape handles are shared `Arc`s).

use indexmap::IndexMap;

use super::matching::Match;
use crate::tree::{CommandTree, Group, Node};

/// Build a pruned, depth-limited copy of the tree covering the given
/// matches.
///
/// `depth` limits each matched node's own subtree: `0` keeps the node but
/// strips its children (its metadata survives, so introspection can show
/// "this exists, drill further"). Intermediate groups on the way to a match
/// keep their own metadata even when they are only waypoints; groups that
/// had none get none fabricated. If any match is the tree root itself the
/// whole tree is depth-limited from the root instead.
pub fn subset(tree: &CommandTree, matches: &[Match<'_>], depth: usize) -> Node {
    if matches.iter().any(|matched| matched.path.is_empty()) {
        return clip(tree.root(), depth);
    }

    let mut pruned: Option<Node> = None;
    for matched in matches {
        let branch = build_branch(tree.root(), &matched.path, depth);
        pruned = Some(match pruned {
            None => branch,
            Some(accumulated) => merge(accumulated, branch),
        });
    }

    // An empty match set prunes everything away.
    pruned.unwrap_or_else(|| Node::Group(Group::new()))
}

/// Copy a node, keeping children only down to `depth` levels.
fn clip(node: &Node, depth: usize) -> Node {
    match node {
        Node::Command(command) => Node::Command(command.clone()),
        Node::Group(group) => {
            let mut children = IndexMap::new();
            if depth > 0 {
                for (name, child) in &group.children {
                    children.insert(name.clone(), clip(child, depth - 1));
                }
            }
            Node::Group(Group::from_parts(group.meta.clone(), children))
        }
    }
}

/// Reconstruct the single branch from `node` along `path`, ending in a
/// depth-clipped copy of the matched node.
fn build_branch(node: &Node, path: &[String], depth: usize) -> Node {
    let Some(first) = path.first() else {
        return clip(node, depth);
    };
    match node {
        // A command cannot be a waypoint: paths come from matching, which
        // never descends past a leaf.
        Node::Command(command) => Node::Command(command.clone()),
        Node::Group(group) => {
            let mut children = IndexMap::new();
            if let Some(child) = group.children.get(first) {
                children.insert(first.clone(), build_branch(child, &path[1..], depth));
            }
            Node::Group(Group::from_parts(group.meta.clone(), children))
        }
    }
}

/// Union two pruned copies of the same tree. Children merge by name;
/// metadata is identical on both sides by construction, so either copy
/// serves.
fn merge(a: Node, b: Node) -> Node {
    match (a, b) {
        (Node::Group(mut ga), Node::Group(gb)) => {
            for (name, child_b) in gb.children {
                match ga.children.get_mut(&name) {
                    Some(child_a) => {
                        let merged = merge(child_a.clone(), child_b);
                        *child_a = merged;
                    }
                    None => {
                        ga.children.insert(name, child_b);
                    }
                }
            }
            Node::Group(ga)
        }
        (a, _) => a,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::matching::find_matches;
    use crate::selector::parse::parse_selector;
    use crate::tree::{Command, CommandTree, Group};

    fn sample_tree() -> CommandTree {
        CommandTree::new(
            Group::new().describe("root").child(
                "deploy",
                Group::new()
                    .describe("deployment targets")
                    .child(
                        "aws",
                        Group::new()
                            .describe("aws targets")
                            .child("lambda", Command::new().describe("deploy a lambda")),
                    )
                    .child("vercel", Command::new()),
            ),
        )
        .unwrap()
    }

    fn select<'a>(tree: &'a CommandTree, selector: &str) -> Vec<Match<'a>> {
        find_matches(tree, &parse_selector(selector).unwrap())
    }

    #[test]
    fn test_depth_zero_strips_children() {
        let tree = sample_tree();
        let matches = select(&tree, ".deploy");
        let pruned = subset(&tree, &matches, 0);

        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        let Node::Group(deploy) = &root.children["deploy"] else {
            panic!("deploy should be a group");
        };
        assert!(deploy.children.is_empty());
        assert_eq!(deploy.meta.description.as_deref(), Some("deployment targets"));
    }

    #[test]
    fn test_depth_one_keeps_children_not_grandchildren() {
        let tree = sample_tree();
        let matches = select(&tree, ".deploy");
        let pruned = subset(&tree, &matches, 1);

        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        let Node::Group(deploy) = &root.children["deploy"] else {
            panic!("deploy should be a group");
        };
        assert_eq!(
            deploy.children.keys().collect::<Vec<_>>(),
            vec!["aws", "vercel"]
        );
        let Node::Group(aws) = &deploy.children["aws"] else {
            panic!("aws should be a group");
        };
        assert!(aws.children.is_empty(), "grandchildren must be stripped");
        assert_eq!(aws.meta.description.as_deref(), Some("aws targets"));
    }

    #[test]
    fn test_waypoint_metadata_preserved() {
        let tree = sample_tree();
        let matches = select(&tree, ".deploy.aws.lambda");
        let pruned = subset(&tree, &matches, 0);

        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        assert_eq!(root.meta.description.as_deref(), Some("root"));
        let Node::Group(deploy) = &root.children["deploy"] else {
            panic!("deploy should be a group");
        };
        assert_eq!(deploy.meta.description.as_deref(), Some("deployment targets"));
        // Only the branch to the match survives.
        assert_eq!(deploy.children.keys().collect::<Vec<_>>(), vec!["aws"]);
    }

    #[test]
    fn test_meta_less_waypoints_stay_meta_less() {
        let tree = CommandTree::new(
            Group::new().child("plain", Group::new().child("cmd", Command::new())),
        )
        .unwrap();
        let matches = select(&tree, ".plain.cmd");
        let pruned = subset(&tree, &matches, 0);

        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        let Node::Group(plain) = &root.children["plain"] else {
            panic!("plain should be a group");
        };
        assert!(plain.meta.description.is_none());
        assert!(!plain.meta.hidden);
    }

    #[test]
    fn test_root_match_depth_limits_whole_tree() {
        let tree = sample_tree();
        let matches = select(&tree, ".");
        let pruned = subset(&tree, &matches, 1);

        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        assert_eq!(root.meta.description.as_deref(), Some("root"));
        let Node::Group(deploy) = &root.children["deploy"] else {
            panic!("deploy should be a group");
        };
        assert!(deploy.children.is_empty());
    }

    #[test]
    fn test_multiple_matches_merge_into_one_tree() {
        let tree = sample_tree();
        let matches = select(&tree, ".deploy.{vercel,aws}");
        let pruned = subset(&tree, &matches, 0);

        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        let Node::Group(deploy) = &root.children["deploy"] else {
            panic!("deploy should be a group");
        };
        assert_eq!(deploy.children.len(), 2);
        assert!(deploy.children.contains_key("vercel"));
        assert!(deploy.children.contains_key("aws"));
    }

    #[test]
    fn test_empty_match_set_prunes_everything() {
        let tree = sample_tree();
        let matches = select(&tree, ".nonexistent");
        let pruned = subset(&tree, &matches, 3);
        let Node::Group(root) = &pruned else {
            panic!("pruned root should be a group");
        };
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_subset_does_not_mutate_original() {
        let tree = sample_tree();
        let matches = select(&tree, ".deploy");
        let _ = subset(&tree, &matches, 0);
        // Original keeps its full depth.
        let full = select(&tree, "..");
        assert_eq!(full.len(), 5);
    }
}
