//! How the running program is invoked, for hint lines.

/// Supplies the command a user types to start the program.
pub trait InvocationName {
    fn invocation(&self) -> String;
}

/// A fixed invocation string.
///
/// # Examples
///
/// ```
/// use command_tree_help::{FixedInvocation, InvocationName};
///
/// let inv = FixedInvocation::new("cargo run --");
/// assert_eq!(inv.invocation(), "cargo run --");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedInvocation(String);

impl FixedInvocation {
    pub fn new(invocation: impl Into<String>) -> Self {
        Self(invocation.into())
    }
}

impl InvocationName for FixedInvocation {
    fn invocation(&self) -> String {
        self.0.clone()
    }
}
