//! Core types for reconciliation passes
//!

use std::fmt::{self, Write as _};

use crate::error::Error;
use crate::model::ContactId;

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Process contacts on the rayon pool instead of sequentially
    pub parallel: bool,
}

/// A nickname that was changed and persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicknameChange {
    /// Contact whose nickname changed
    pub id: ContactId,
    /// Nickname before the pass
    pub old: Option<String>,
    /// Nickname after the pass
    pub new: Option<String>,
}

impl NicknameChange {
    /// True when the change removed the nickname
    pub fn is_cleared(&self) -> bool {
        self.new.is_none()
    }
}

impl fmt::Display for NicknameChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.old, &self.new) {
            (None, Some(new)) => write!(f, "+ {}: {new:?}", self.id),
            (Some(old), None) => write!(f, "- {}: {old:?}", self.id),
            (old, new) => write!(
                f,
                "~ {}: {:?} -> {:?}",
                self.id,
                old.as_deref().unwrap_or_default(),
                new.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// A nickname write the store did not accept
#[derive(Debug)]
pub struct WriteFailure {
    /// Contact whose nickname stayed stale
    pub id: ContactId,
    /// The store error
    pub error: Error,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "! {}: {}", self.id, self.error)
    }
}

/// What happened to one contact during a pass
#[derive(Debug)]
pub(crate) enum ContactOutcome {
    Changed(NicknameChange),
    Unchanged,
    NotCached,
    WriteFailed(Error),
}

/// Result of a reconciliation pass
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Visible contacts considered
    pub examined: usize,
    /// Persisted nickname changes, one per notification sent
    pub changes: Vec<NicknameChange>,
    /// Contacts whose nickname already matched
    pub unchanged: usize,
    /// Visible contacts with no cached record
    pub not_cached: Vec<ContactId>,
    /// Contacts whose snapshot entry could not be decoded
    pub decode_failures: Vec<ContactId>,
    /// Contacts whose write failed
    pub write_failures: Vec<WriteFailure>,
}

impl ReconcileReport {
    pub(crate) fn record(&mut self, id: ContactId, decode_failed: bool, outcome: ContactOutcome) {
        self.examined += 1;
        if decode_failed {
            self.decode_failures.push(id);
        }
        match outcome {
            ContactOutcome::Changed(change) => self.changes.push(change),
            ContactOutcome::Unchanged => self.unchanged += 1,
            ContactOutcome::NotCached => self.not_cached.push(id),
            ContactOutcome::WriteFailed(error) => self.write_failures.push(WriteFailure { id, error }),
        }
    }

    /// Check if the pass changed nothing
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Check if any write failed
    pub fn has_failures(&self) -> bool {
        !self.write_failures.is_empty()
    }

    /// Ids that were notified, in pass order
    pub fn changed_ids(&self) -> Vec<ContactId> {
        self.changes.iter().map(|c| c.id).collect()
    }

    /// Count of nicknames removed by the pass
    pub fn cleared_count(&self) -> usize {
        self.changes.iter().filter(|c| c.is_cleared()).count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} contact(s) examined: {} changed ({} cleared), {} unchanged",
            self.examined,
            self.changes.len(),
            self.cleared_count(),
            self.unchanged
        );
        if !self.not_cached.is_empty() {
            let _ = write!(summary, ", {} not cached", self.not_cached.len());
        }
        if !self.decode_failures.is_empty() {
            let _ = write!(summary, ", {} undecodable", self.decode_failures.len());
        }
        if !self.write_failures.is_empty() {
            let _ = write!(summary, ", {} failed", self.write_failures.len());
        }
        summary
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            writeln!(f, "{change}")?;
        }
        for failure in &self.write_failures {
            writeln!(f, "{failure}")?;
        }
        writeln!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_only_nonzero_problems() {
        let mut report = ReconcileReport::default();
        report.record(
            ContactId(1),
            false,
            ContactOutcome::Changed(NicknameChange {
                id: ContactId(1),
                old: Some("Bobby".to_string()),
                new: None,
            }),
        );
        report.record(ContactId(2), false, ContactOutcome::Unchanged);
        assert_eq!(
            report.summary(),
            "2 contact(s) examined: 1 changed (1 cleared), 1 unchanged"
        );

        report.record(ContactId(3), false, ContactOutcome::NotCached);
        report.record(ContactId(4), true, ContactOutcome::Unchanged);
        report.record(
            ContactId(5),
            false,
            ContactOutcome::WriteFailed(Error::ContactNotCached(ContactId(5))),
        );
        assert_eq!(
            report.summary(),
            "5 contact(s) examined: 1 changed (1 cleared), 2 unchanged, \
             1 not cached, 1 undecodable, 1 failed"
        );
    }
}
