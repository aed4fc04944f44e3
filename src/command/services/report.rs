//! Outcome summaries of synchronization passes.

use std::collections::BTreeMap;

use crate::command::domain::{CommandName, CommandScope, RemoteCommandId};

/// What a reconciliation pass did to one declared command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandChange {
    /// The command was registered remotely.
    Created,
    /// The remote definition was replaced.
    Updated,
    /// The remote definition already matched.
    Unchanged,
    /// A gateway or registry call failed; the command is retried next pass.
    Failed,
}

/// Result of converging one declared command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Identifier the command is reachable under after the pass, if any.
    pub remote_id: Option<RemoteCommandId>,
    /// What happened.
    pub change: CommandChange,
}

impl CommandOutcome {
    pub(super) const fn new(remote_id: RemoteCommandId, change: CommandChange) -> Self {
        Self {
            remote_id: Some(remote_id),
            change,
        }
    }

    pub(super) const fn failed(remote_id: Option<RemoteCommandId>) -> Self {
        Self {
            remote_id,
            change: CommandChange::Failed,
        }
    }
}

/// Summary of one `reconcile` pass over a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeReport {
    scope: CommandScope,
    active: BTreeMap<CommandName, RemoteCommandId>,
    created: usize,
    updated: usize,
    unchanged: usize,
    deleted: usize,
    failed: usize,
}

impl ScopeReport {
    pub(super) const fn new(scope: CommandScope) -> Self {
        Self {
            scope,
            active: BTreeMap::new(),
            created: 0,
            updated: 0,
            unchanged: 0,
            deleted: 0,
            failed: 0,
        }
    }

    pub(super) fn record(&mut self, name: &CommandName, outcome: CommandOutcome) {
        if let Some(remote_id) = outcome.remote_id {
            self.active.insert(name.clone(), remote_id);
        }
        match outcome.change {
            CommandChange::Created => self.created += 1,
            CommandChange::Updated => self.updated += 1,
            CommandChange::Unchanged => self.unchanged += 1,
            CommandChange::Failed => self.failed += 1,
        }
    }

    pub(super) const fn record_deletion(&mut self, deleted: bool) {
        if deleted {
            self.deleted += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Returns the reconciled scope.
    #[must_use]
    pub const fn scope(&self) -> CommandScope {
        self.scope
    }

    /// Returns the enabled commands reachable after the pass, by name.
    #[must_use]
    pub const fn active(&self) -> &BTreeMap<CommandName, RemoteCommandId> {
        &self.active
    }

    /// Returns the identifier of an active command.
    #[must_use]
    pub fn remote_id(&self, name: &CommandName) -> Option<RemoteCommandId> {
        self.active.get(name).copied()
    }

    /// Number of commands registered during the pass.
    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }

    /// Number of remote definitions replaced during the pass.
    #[must_use]
    pub const fn updated(&self) -> usize {
        self.updated
    }

    /// Number of commands whose remote definition already matched.
    #[must_use]
    pub const fn unchanged(&self) -> usize {
        self.unchanged
    }

    /// Number of dangling commands removed.
    #[must_use]
    pub const fn deleted(&self) -> usize {
        self.deleted
    }

    /// Number of operations that failed and will be retried next pass.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }
}

/// Summary of a full synchronization over every scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    scopes: Vec<ScopeReport>,
}

impl SyncReport {
    pub(super) const fn new(scopes: Vec<ScopeReport>) -> Self {
        Self { scopes }
    }

    /// Returns the per-scope reports, global scope first.
    #[must_use]
    pub fn scopes(&self) -> &[ScopeReport] {
        &self.scopes
    }

    /// Returns the report of one scope.
    #[must_use]
    pub fn scope(&self, scope: CommandScope) -> Option<&ScopeReport> {
        self.scopes.iter().find(|report| report.scope == scope)
    }

    /// Returns every active `(scope, name, remote id)` triple.
    pub fn active(&self) -> impl Iterator<Item = (CommandScope, &CommandName, RemoteCommandId)> {
        self.scopes.iter().flat_map(|report| {
            report
                .active
                .iter()
                .map(|(name, remote_id)| (report.scope, name, *remote_id))
        })
    }

    /// Total number of failed operations across scopes.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.scopes.iter().map(ScopeReport::failed).sum()
    }
}
