//! Query coordination with a sequence-number race guard.
//!
//! The coordinator owns the current [`QueryDescriptor`] and the [`LoadPhase`].
//! Each issued query gets a strictly increasing sequence number. A completion
//! is applied only when its number matches the most recent issuance, so the
//! last query issued always wins regardless of arrival order.
//!
//! ```text
//!           sync / retrigger
//!   Idle ───────────────────▶ Loading ◀──────────────┐
//!                             │     │                │ sync / retrigger
//!             complete(Ok)    │     │ complete(Err)  │
//!                             ▼     ▼                │
//!                        Loaded     Failed ──────────┘
//! ```

use crate::domain::error::{AnimescopeError, Result};
use crate::domain::{AnimeRecord, QueryDescriptor};
use crate::provider::QueryRequest;

/// Lifecycle of the current query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A query ready to be sent by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundQuery {
    pub seq: u64,
    pub request: QueryRequest,
}

/// Outcome of feeding a response into the coordinator.
#[derive(Debug)]
pub enum Completion {
    /// The response belonged to a superseded query and was ignored.
    Discarded,
    /// Fresh records in provider order.
    Loaded(Vec<AnimeRecord>),
    /// The current query failed.
    Failed(AnimescopeError),
}

#[derive(Debug, Clone, Default)]
pub struct QueryCoordinator {
    descriptor: QueryDescriptor,
    phase: LoadPhase,
    /// Highest sequence number issued so far; `0` means nothing was issued.
    issued_seq: u64,
}

impl QueryCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the coordinator with the latest committed text and genres.
    ///
    /// Issues a query on the first call and whenever the descriptor changes.
    pub fn sync<I, S>(&mut self, text: &str, genres: I) -> Option<OutboundQuery>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let descriptor = QueryDescriptor::new(text, genres);
        if self.issued_seq > 0 && descriptor == self.descriptor {
            tracing::trace!("descriptor unchanged, no query issued");
            return None;
        }

        self.descriptor = descriptor;
        Some(self.issue())
    }

    /// Re-issues the current descriptor under a fresh sequence number.
    ///
    /// Returns `None` until the first query has been issued.
    pub fn retrigger(&mut self) -> Option<OutboundQuery> {
        if self.issued_seq == 0 {
            return None;
        }
        Some(self.issue())
    }

    fn issue(&mut self) -> OutboundQuery {
        self.issued_seq += 1;
        self.phase = LoadPhase::Loading;

        let _span = tracing::debug_span!(
            "query_issue",
            seq = self.issued_seq,
            text_len = self.descriptor.text().len(),
            genre_count = self.descriptor.genres().len()
        )
        .entered();
        tracing::debug!("query issued");

        OutboundQuery {
            seq: self.issued_seq,
            request: QueryRequest {
                query: self.descriptor.text().to_string(),
                genres: self.descriptor.genres().to_vec(),
            },
        }
    }

    /// Applies a response tagged with `seq`.
    ///
    /// Responses for anything other than the latest issued query, or arriving
    /// when no query is outstanding, are discarded without touching state.
    pub fn complete(&mut self, seq: u64, outcome: Result<Vec<AnimeRecord>>) -> Completion {
        let _span = tracing::debug_span!(
            "query_complete",
            seq,
            latest = self.issued_seq,
            phase = ?self.phase
        )
        .entered();

        if seq != self.issued_seq || self.phase != LoadPhase::Loading {
            tracing::debug!("stale response discarded");
            return Completion::Discarded;
        }

        match outcome {
            Ok(records) => {
                tracing::debug!(count = records.len(), "results applied");
                self.phase = LoadPhase::Loaded;
                Completion::Loaded(records)
            }
            Err(err) => {
                tracing::error!(error = %err, "query failed");
                self.phase = LoadPhase::Failed;
                Completion::Failed(err)
            }
        }
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub const fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn issued_seq(&self) -> u64 {
        self.issued_seq
    }

    /// Returns `true` once the initial query has been issued.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.issued_seq > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Score;

    fn record(id: u64) -> AnimeRecord {
        AnimeRecord {
            id,
            name: format!("Title {id}"),
            score: Score::Text("7.0".to_string()),
            genres: String::new(),
            anger: 0.0,
            disgust: 0.0,
            fear: 0.0,
            sadness: 0.0,
            happiness: 0.0,
            neutral: 0.0,
            surprise: 0.0,
            synopsis: None,
        }
    }

    #[test]
    fn first_sync_issues_even_for_empty_descriptor() {
        let mut coordinator = QueryCoordinator::new();
        let query = coordinator.sync("", Vec::<String>::new()).unwrap();
        assert_eq!(query.seq, 1);
        assert_eq!(query.request.query, "");
        assert!(query.request.genres.is_empty());
        assert_eq!(coordinator.phase(), LoadPhase::Loading);
    }

    #[test]
    fn unchanged_descriptor_does_not_reissue() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", ["Action", "Drama"]);
        assert!(coordinator.sync("a", ["Drama", "Action"]).is_none());
        assert_eq!(coordinator.issued_seq(), 1);
    }

    #[test]
    fn changed_descriptor_issues_with_next_seq() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", Vec::<String>::new());
        let query = coordinator.sync("ab", Vec::<String>::new()).unwrap();
        assert_eq!(query.seq, 2);
        assert_eq!(query.request.query, "ab");
    }

    #[test]
    fn only_latest_sequence_is_applied() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", Vec::<String>::new());
        coordinator.sync("b", Vec::<String>::new());

        assert!(matches!(
            coordinator.complete(2, Ok(vec![record(2)])),
            Completion::Loaded(ref records) if records[0].id == 2
        ));
        assert!(matches!(
            coordinator.complete(1, Ok(vec![record(1)])),
            Completion::Discarded
        ));
        assert_eq!(coordinator.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn early_response_to_superseded_query_is_discarded() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", Vec::<String>::new());
        coordinator.sync("b", Vec::<String>::new());

        assert!(matches!(
            coordinator.complete(1, Ok(vec![record(1)])),
            Completion::Discarded
        ));
        assert_eq!(coordinator.phase(), LoadPhase::Loading);
    }

    #[test]
    fn stale_failure_does_not_change_phase() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", Vec::<String>::new());
        coordinator.sync("b", Vec::<String>::new());
        coordinator.complete(2, Ok(vec![]));

        let err = AnimescopeError::Transport { status: 500, message: String::new() };
        assert!(matches!(coordinator.complete(1, Err(err)), Completion::Discarded));
        assert_eq!(coordinator.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn current_failure_sets_failed() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", Vec::<String>::new());
        let err = AnimescopeError::MalformedResponse("not an array".to_string());
        assert!(matches!(coordinator.complete(1, Err(err)), Completion::Failed(_)));
        assert_eq!(coordinator.phase(), LoadPhase::Failed);
    }

    #[test]
    fn duplicate_delivery_is_discarded() {
        let mut coordinator = QueryCoordinator::new();
        coordinator.sync("a", Vec::<String>::new());
        coordinator.complete(1, Ok(vec![]));
        assert!(matches!(coordinator.complete(1, Ok(vec![])), Completion::Discarded));
    }

    #[test]
    fn retrigger_requires_mount_and_bumps_seq() {
        let mut coordinator = QueryCoordinator::new();
        assert!(coordinator.retrigger().is_none());

        coordinator.sync("a", ["Drama"]);
        coordinator.complete(1, Ok(vec![]));
        let query = coordinator.retrigger().unwrap();
        assert_eq!(query.seq, 2);
        assert_eq!(query.request.genres, ["Drama"]);
        assert_eq!(coordinator.phase(), LoadPhase::Loading);
    }
}
