//! Declarative command tree: the recursive Command/Group sum type.
//!
//! A tree is built once, up front, and is read-only for the lifetime of the
//! process. [`CommandTree::new`] is the validated handle every engine
//! function takes; it rejects misconfigurations (variadic placement,
//! duplicate sibling names) at construction rather than per invocation.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ConfigError;
use crate::schema::InputShape;

/// Metadata attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

/// Metadata attached to a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

/// A declared positional argument of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionalArg {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absorbs every remaining positional token as a list. Must be last.
    pub variadic: bool,
}

impl PositionalArg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            variadic: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// A leaf node: one invocable operation.
#[derive(Clone, Serialize)]
pub struct Command {
    #[serde(flatten)]
    pub meta: CommandMeta,
    /// Opaque validator-schema handle; `None` when the command takes no input.
    #[serde(skip)]
    pub input_shape: Option<Arc<dyn InputShape>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub positional_args: Vec<PositionalArg>,
}

impl Command {
    pub fn new() -> Self {
        Self {
            meta: CommandMeta::default(),
            input_shape: None,
            positional_args: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.meta.aliases.push(alias.into());
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.meta.examples.push(example.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.meta.deprecated = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.hidden = true;
        self
    }

    pub fn input_shape(mut self, shape: Arc<dyn InputShape>) -> Self {
        self.input_shape = Some(shape);
        self
    }

    pub fn positional(mut self, arg: PositionalArg) -> Self {
        self.positional_args.push(arg);
        self
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("meta", &self.meta)
            .field("input_shape", &self.input_shape.as_ref().map(|_| "<shape>"))
            .field("positional_args", &self.positional_args)
            .finish()
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        // Shape handles compare by identity: a pruned copy shares the Arc.
        let shapes_eq = match (&self.input_shape, &other.input_shape) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        shapes_eq && self.meta == other.meta && self.positional_args == other.positional_args
    }
}

/// A branch node holding named children.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    #[serde(flatten)]
    pub meta: GroupMeta,
    pub children: IndexMap<String, Node>,
    /// Names that were declared twice. Recorded at insertion, rejected by
    /// [`CommandTree::new`].
    #[serde(skip)]
    duplicate_names: Vec<String>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.hidden = true;
        self
    }

    pub fn child(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        let name = name.into();
        if self.children.insert(name.clone(), node.into()).is_some() {
            self.duplicate_names.push(name);
        }
        self
    }

    pub(crate) fn from_parts(meta: GroupMeta, children: IndexMap<String, Node>) -> Self {
        Self {
            meta,
            children,
            duplicate_names: Vec::new(),
        }
    }
}

/// A node of the command tree. The Command/Group identity is fixed at
/// construction; there is no silently-inferred third variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Command(Command),
    Group(Group),
}

impl Node {
    pub fn is_command(&self) -> bool {
        matches!(self, Node::Command(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Node::Command(command) => command.meta.description.as_deref(),
            Node::Group(group) => group.meta.description.as_deref(),
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Node::Command(command) => command.meta.hidden,
            Node::Group(group) => group.meta.hidden,
        }
    }

    /// Child mapping, `None` for commands (commands are always leaves).
    pub fn children(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Command(_) => None,
            Node::Group(group) => Some(&group.children),
        }
    }
}

impl From<Command> for Node {
    fn from(command: Command) -> Self {
        Node::Command(command)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

/// Validated, read-only handle to a declared command tree.
#[derive(Debug, Clone)]
pub struct CommandTree {
    root: Node,
}

impl CommandTree {
    /// Validate the declared tree and wrap it. Misconfiguration here means
    /// the embedding application is broken, so it is rejected outright
    /// instead of degrading per invocation.
    pub fn new(root: impl Into<Node>) -> Result<Self, ConfigError> {
        let root = root.into();
        validate(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}

fn validate(node: &Node) -> Result<(), ConfigError> {
    match node {
        Node::Command(command) => check_variadic_placement(&command.positional_args),
        Node::Group(group) => {
            if let Some(name) = group.duplicate_names.first() {
                return Err(ConfigError::DuplicateChild { name: name.clone() });
            }
            for child in group.children.values() {
                validate(child)?;
            }
            Ok(())
        }
    }
}

/// A variadic positional may only appear in the last slot.
pub(crate) fn check_variadic_placement(args: &[PositionalArg]) -> Result<(), ConfigError> {
    for arg in args.iter().rev().skip(1) {
        if arg.variadic {
            return Err(ConfigError::VariadicNotLast {
                name: arg.name.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
