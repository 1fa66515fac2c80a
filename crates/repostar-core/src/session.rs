// Search view state: Idle -> Loading -> Loaded -> Loading -> ...
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{models::RepositoryRecord, search::SearchProvider, store::SearchResults, Result};

/// The only message a user ever sees for a failed search
pub const FETCH_FAILED_NOTICE: &str = "Error fetching repositories. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing searched yet
    Idle,
    /// A request is in flight
    Loading,
    /// Last request finished, successfully or not
    Loaded,
}

/// Handle for one issued search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub query: String,
}

/// What came back for a ticket
#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<RepositoryRecord>>,
}

/// A transient, user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results store now holds this many records
    Applied(usize),
    /// Request failed; results untouched, notice recorded
    Failed,
    /// A newer ticket was issued since; response ignored
    Stale,
}

/// Drives one search screen
///
/// Owns no records itself. The results store is passed in on completion so
/// the caller decides who owns it.
#[derive(Debug)]
pub struct SearchSession {
    state: SearchState,
    next_seq: u64,
    latest: Option<u64>,
    last_query: Option<String>,
    notices: Vec<Notice>,
    notice_visible: bool,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
            next_seq: 1,
            latest: None,
            last_query: None,
            notices: Vec::new(),
            notice_visible: false,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SearchState::Loading
    }

    /// Query of the most recently issued search
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Issue a new ticket. Any older ticket still in flight becomes stale.
    pub fn begin(&mut self, query: &str) -> Ticket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some(seq);
        self.last_query = Some(query.to_string());
        self.state = SearchState::Loading;
        debug!("search #{} started for {:?}", seq, query);

        Ticket {
            seq,
            query: query.to_string(),
        }
    }

    /// Apply a finished search to `results`
    pub fn complete(&mut self, outcome: SearchOutcome, results: &mut SearchResults) -> Completion {
        if self.latest != Some(outcome.seq) {
            warn!(
                "discarding stale response #{} for {:?} (latest is #{:?})",
                outcome.seq, outcome.query, self.latest
            );
            return Completion::Stale;
        }

        self.state = SearchState::Loaded;
        match outcome.result {
            Ok(records) => {
                let count = records.len();
                info!("search {:?} returned {} repositories", outcome.query, count);
                results.replace(records);
                Completion::Applied(count)
            }
            Err(e) => {
                warn!("search {:?} failed: {}", outcome.query, e);
                self.notices.push(Notice {
                    message: FETCH_FAILED_NOTICE.to_string(),
                    at: Utc::now(),
                });
                self.notice_visible = true;
                Completion::Failed
            }
        }
    }

    /// Every notice raised during this session, oldest first
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// The notice to show right now, if it hasn't been dismissed
    pub fn current_notice(&self) -> Option<&Notice> {
        if self.notice_visible {
            self.notices.last()
        } else {
            None
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice_visible = false;
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the request behind a ticket
pub async fn execute(provider: &dyn SearchProvider, ticket: Ticket) -> SearchOutcome {
    let result = provider.search(&ticket.query).await;
    SearchOutcome {
        seq: ticket.seq,
        query: ticket.query,
        result,
    }
}
