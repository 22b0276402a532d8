//! # cmdtree
//!
//! **Declarative command trees** - the argument-parsing and
//! command-resolution engine behind a subcommand CLI.
//!
//! A program declares a tree of commands (possibly nested into groups); at
//! invocation time cmdtree turns the flat argv tail into a resolved command,
//! a structured candidate-input object for an external validator, and
//! queryable views of the tree for introspection tooling.
//!
//! ## Features
//!
//! - **Token Parser** - flags (long, short, bundled, dotted, repeated) and
//!   positionals from raw argv, one deterministic pass
//! - **Router** - walks the tree over positional tokens, resolving aliases,
//!   reporting misses as data rather than errors
//! - **Input Builder** - merges flags with declared positional arguments
//!   (ordinary and variadic) into the validator's candidate object
//! - **Selector Engine** - a small path-query language (`.a.b`, `.a.*`,
//!   `.a.{b,c}`, `..name`) for navigating and pruning the tree
//! - **Completion Advisor** - suggestion candidates for the token being
//!   typed, sharing the router's walking primitive
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdtree::{Command, CommandTree, Group, PositionalArg};
//!
//! let tree = CommandTree::new(
//!     Group::new().describe("demo").child(
//!         "user",
//!         Group::new()
//!             .child("list", Command::new().alias("ls"))
//!             .child(
//!                 "get",
//!                 Command::new().positional(PositionalArg::new("id")),
//!             ),
//!     ),
//! )
//! .unwrap();
//!
//! let argv: Vec<String> = vec!["user".into(), "get".into(), "42".into()];
//! let parsed = cmdtree::tokens::parse(&argv);
//! let resolution = cmdtree::router::resolve(&tree, &parsed.positionals);
//! assert_eq!(resolution.command_path, vec!["user", "get"]);
//! ```
//!
//! Validation itself, help rendering, and completion-script emission are
//! external collaborators: cmdtree hands them data ([`router::Resolution`],
//! selector [`selector::Match`] lists, pruned [`Node`] trees) and a
//! pluggable [`schema::InputShape`] seam.

// ============================================================================
// Core Modules
// ============================================================================

/// Flag/positional token parsing.
///
/// Contains [`ParsedTokens`](tokens::ParsedTokens) and the single-pass
/// [`parse`](tokens::parse) function.
pub mod tokens;

/// The declared command tree: [`Node`], [`Command`], [`Group`], metadata,
/// positional-argument declarations, and the validated [`CommandTree`]
/// handle.
pub mod tree;

/// Command routing over positional tokens.
///
/// [`resolve`](router::resolve) produces a [`Resolution`](router::Resolution);
/// misses are data, not errors.
pub mod router;

/// Candidate-input assembly from flags and consumed positionals.
pub mod input;

/// The selector path-query language: parsing, matching, subtree pruning.
pub mod selector;

/// Completion suggestions for a partial command line.
pub mod complete;

/// Did-you-mean suggestions for routing misses, via Levenshtein distance.
pub mod suggest;

/// Validation/introspection capability interface ([`schema::InputShape`]).
pub mod schema;

/// Configuration and selector error types.
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// A node of the command tree (command or group).
pub use tree::Node;

/// Leaf node: one invocable operation.
pub use tree::Command;

/// Branch node holding named children.
pub use tree::Group;

/// Declared positional argument.
pub use tree::PositionalArg;

/// Validated, read-only tree handle.
pub use tree::CommandTree;

/// Result of one token-parsing pass.
pub use tokens::ParsedTokens;

/// Routing outcome.
pub use router::Resolution;

/// Selector step and match records.
pub use selector::{Match, Step};

/// Completion request.
pub use complete::CompletionRequest;

/// Pluggable input-shape capability.
pub use schema::InputShape;

/// Construction-time configuration error.
pub use error::ConfigError;

/// Malformed-selector error.
pub use error::SelectorError;
