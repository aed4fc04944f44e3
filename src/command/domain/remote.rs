//! Command definitions as reported back by the gateway.

use super::{CommandDescriptor, CommandOption, RemoteCommandId};

/// A command definition fetched from the gateway.
///
/// The remote side is not trusted to hold valid declarations, so names and
/// descriptions stay raw strings. Options the crate cannot model (for example
/// sub-commands) are dropped and recorded with a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    id: RemoteCommandId,
    name: String,
    description: String,
    options: Vec<CommandOption>,
    has_unrepresentable_options: bool,
}

impl RemoteCommand {
    /// Creates a remote definition without options.
    #[must_use]
    pub fn new(id: RemoteCommandId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            has_unrepresentable_options: false,
        }
    }

    /// Mirrors a local descriptor, as the gateway stores it after a create.
    #[must_use]
    pub fn from_descriptor(id: RemoteCommandId, descriptor: &CommandDescriptor) -> Self {
        Self::new(id, descriptor.name().as_str(), descriptor.description())
            .with_options(descriptor.options().iter().cloned())
    }

    /// Sets the remote options in order.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = CommandOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Records that at least one remote option could not be represented.
    #[must_use]
    pub const fn with_unrepresentable_options(mut self) -> Self {
        self.has_unrepresentable_options = true;
        self
    }

    /// Returns the remote identifier.
    #[must_use]
    pub const fn id(&self) -> RemoteCommandId {
        self.id
    }

    /// Returns the remote name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the remote description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the remote options that could be represented.
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Returns whether the remote definition equals the local declaration.
    ///
    /// Name, description and the ordered options (type, name, description,
    /// required flag and ordered choices) must all be identical.
    #[must_use]
    pub fn matches(&self, descriptor: &CommandDescriptor) -> bool {
        !self.has_unrepresentable_options
            && self.name == descriptor.name().as_str()
            && self.description == descriptor.description()
            && self.options.as_slice() == descriptor.options()
    }
}
