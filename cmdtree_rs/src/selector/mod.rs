//! Selector engine: the path-query language over the command tree.
//!
//! Three pieces, used in sequence by introspection tooling:
//!
//! - [`parse::parse_selector`] - selector string to step sequence
//! - [`matching::find_matches`] - step sequence to ordered (path, node) hits
//! - [`subset::subset`] - hits back to a pruned, depth-limited tree copy
//!
//! The selector string syntax is the one user-facing wire format this crate
//! parses at the process boundary (e.g. a `--select` flag value): `.a.b`
//! keys, `.a.*` one-level wildcard, `.a.{b,c}` explicit sets, `..name`
//! recursive descent.

pub mod matching;
pub mod parse;
pub mod subset;

pub use matching::{Match, find_matches};
pub use parse::{Step, parse_selector};
pub use subset::subset;
