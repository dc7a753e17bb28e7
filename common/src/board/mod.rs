//! The Request Board Controller.
//!
//! `RequestBoard` holds the authoritative local list of service requests and
//! everything derived from it: the stats cards, the filtered view, the CSV
//! export and the detail selection. It performs no I/O. Every network-bound
//! operation is split in two steps so it fits both an Elm-style UI loop and a
//! plain `async` caller:
//!
//! 1. `begin_*` validates preconditions (credential present, nothing else in
//!    flight), flips the loading flag and hands back a ticket.
//! 2. The caller performs the HTTP exchange with the ticket's credential.
//! 3. `complete_*` consumes the ticket and the result and reconciles state.
//!
//! Fetch tickets carry a generation number. Starting a new fetch supersedes
//! older ones, so a slow answer to an old fetch is discarded instead of
//! overwriting fresher data. Status transitions are single-flight over the
//! whole board.
//!
//! `Controller` chains those steps with a `MechanicClient` for native callers.

pub mod export;
pub mod filter;

use crate::api::{Credential, HttpTransport, MechanicClient};
use crate::error::{BoardError, Result};
use crate::model::{DerivedStats, MechanicProfile, RequestStatus, ServiceRequest, StatsSource};
use export::{CsvExport, ExportOptions, ExportOutcome};
use filter::{StatusFilter, Tab, ViewFilter};
use log::{debug, error, warn};
use std::collections::HashSet;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Destructive,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Destructive,
        }
    }

    pub fn from_error(err: &BoardError) -> Self {
        Notice::destructive("Error", err.to_string())
    }

    pub fn is_destructive(&self) -> bool {
        self.level == NoticeLevel::Destructive
    }
}

/// Permission to run one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub credential: Credential,
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of applying a fetch answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection now holds this many requests.
    Loaded(usize),
    /// The collection was cleared and the error recorded.
    Failed(BoardError),
    /// A newer fetch started meanwhile; nothing was applied.
    Superseded,
}

/// Permission to send one status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTicket {
    pub credential: Credential,
    pub request_id: String,
    pub target: RequestStatus,
    seq: u64,
}

/// What the caller must do after a status change finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub notice: Notice,
    /// Present on success: the full re-fetch to run next.
    pub refetch: Option<FetchTicket>,
}

/// What the export action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub file: Option<CsvExport>,
    pub notice: Notice,
}

#[derive(Debug, Default)]
pub struct RequestBoard {
    requests: Vec<ServiceRequest>,
    stats: StatsSource,
    error: Option<String>,
    filter: ViewFilter,
    selected: Option<String>,
    generation: u64,
    fetch_pending: bool,
    transition: Option<TransitionTicket>,
    transition_seq: u64,
}

impl RequestBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[ServiceRequest] {
        &self.requests
    }

    pub fn request(&self, id: &str) -> Option<&ServiceRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn stats(&self) -> DerivedStats {
        self.stats.stats()
    }

    pub fn profile(&self) -> Option<&MechanicProfile> {
        self.stats.profile()
    }

    /// Message for the full-page error state, set by a failed load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a fetch or a status change is in flight.
    pub fn is_loading(&self) -> bool {
        self.fetch_pending || self.transition.is_some()
    }

    pub fn is_transition_pending(&self) -> bool {
        self.transition.is_some()
    }

    // ---- Collection Loader ----

    /// Starts a (re)load. Without a credential nothing is sent: the error
    /// state is set and the collection is left as it was.
    pub fn begin_fetch(&mut self, credential: Option<Credential>) -> Result<FetchTicket> {
        let Some(credential) = credential else {
            self.error = Some(BoardError::Auth.to_string());
            return Err(BoardError::Auth);
        };

        self.generation += 1;
        self.fetch_pending = true;
        self.error = None;
        Ok(FetchTicket {
            credential,
            generation: self.generation,
        })
    }

    /// Applies a fetch answer if `ticket` is still the latest fetch.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<(Vec<ServiceRequest>, Option<MechanicProfile>)>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                "Discarding fetch #{} superseded by #{}",
                ticket.generation, self.generation
            );
            return FetchOutcome::Superseded;
        }
        self.fetch_pending = false;

        match result {
            Ok((requests, profile)) => {
                self.requests = dedup_by_id(requests);
                self.stats = StatsSource::resolve(&self.requests, profile);
                self.error = None;
                FetchOutcome::Loaded(self.requests.len())
            }
            Err(err) => {
                error!("Error fetching requests: {}", err);
                self.requests.clear();
                self.stats = StatsSource::resolve(&self.requests, None);
                self.error = Some(err.to_string());
                FetchOutcome::Failed(err)
            }
        }
    }

    // ---- Status Transition ----

    /// Reserves the single transition slot. Unknown ids are not rejected here:
    /// the backend is the one validating them.
    pub fn begin_transition(
        &mut self,
        credential: Option<Credential>,
        request_id: &str,
        target: RequestStatus,
    ) -> Result<TransitionTicket> {
        let credential = credential.ok_or(BoardError::Auth)?;
        if self.transition.is_some() {
            return Err(BoardError::Busy);
        }

        self.transition_seq += 1;
        let ticket = TransitionTicket {
            credential,
            request_id: request_id.to_string(),
            target,
            seq: self.transition_seq,
        };
        self.transition = Some(ticket.clone());
        Ok(ticket)
    }

    /// Releases the transition slot. On success the detail view is closed and
    /// a re-fetch ticket is issued; the local entry itself is never patched.
    pub fn complete_transition(
        &mut self,
        ticket: TransitionTicket,
        result: Result<()>,
    ) -> Option<TransitionOutcome> {
        match &self.transition {
            Some(current) if current.seq == ticket.seq => self.transition = None,
            _ => {
                warn!(
                    "Ignoring completion of unknown status update for {}",
                    ticket.request_id
                );
                return None;
            }
        }

        Some(match result {
            Ok(()) => {
                self.selected = None;
                let notice = Notice::info(
                    "Success",
                    format!("Request status updated to {}", ticket.target),
                );
                let refetch = self.begin_fetch(Some(ticket.credential)).ok();
                TransitionOutcome { notice, refetch }
            }
            Err(err) => {
                error!(
                    "Error updating request status for {}: {}",
                    ticket.request_id, err
                );
                TransitionOutcome {
                    notice: Notice::from_error(&err),
                    refetch: None,
                }
            }
        })
    }

    // ---- View Filter ----

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.filter.tab = tab;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    /// Requests matching the current filter, in collection order.
    pub fn visible(&self) -> Vec<&ServiceRequest> {
        self.filter.apply(&self.requests)
    }

    // ---- Detail view ----

    pub fn open_details(&mut self, request_id: &str) {
        self.selected = Some(request_id.to_string());
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ServiceRequest> {
        self.selected.as_deref().and_then(|id| self.request(id))
    }

    // ---- CSV Exporter ----

    /// Never fails: every outcome, including writer errors, becomes a notice.
    pub fn export(&self, options: ExportOptions) -> ExportReport {
        match export::export_completed(&self.requests, options) {
            Ok(ExportOutcome::Empty) => ExportReport {
                file: None,
                notice: Notice::destructive("No Data", "There are no completed services to export."),
            },
            Ok(ExportOutcome::Ready(file)) => ExportReport {
                notice: Notice::info(
                    "Export Successful",
                    format!("{} completed services exported to CSV.", file.rows),
                ),
                file: Some(file),
            },
            Err(err) => {
                error!("Error exporting data: {}", err);
                ExportReport {
                    file: None,
                    notice: Notice::destructive("Export Failed", "Failed to export data. Please try again."),
                }
            }
        }
    }
}

fn dedup_by_id(requests: Vec<ServiceRequest>) -> Vec<ServiceRequest> {
    let mut seen = HashSet::with_capacity(requests.len());
    requests
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id.clone());
            if !fresh {
                warn!("Dropping duplicate service request {}", r.id);
            }
            fresh
        })
        .collect()
}

/// Drives a `RequestBoard` through a `MechanicClient`, one awaited step at a time.
pub struct Controller<T> {
    board: RequestBoard,
    client: MechanicClient<T>,
}

impl<T: HttpTransport> Controller<T> {
    pub fn new(client: MechanicClient<T>) -> Self {
        Self {
            board: RequestBoard::new(),
            client,
        }
    }

    pub fn board(&self) -> &RequestBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut RequestBoard {
        &mut self.board
    }

    pub fn client(&self) -> &MechanicClient<T> {
        &self.client
    }

    /// Collection Loader.
    pub async fn refresh(&mut self, credential: Option<Credential>) -> FetchOutcome {
        match self.board.begin_fetch(credential) {
            Ok(ticket) => self.run_fetch(ticket).await,
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    /// Status Transition followed, on success, by a full reload.
    pub async fn update_status(
        &mut self,
        credential: Option<Credential>,
        request_id: &str,
        target: RequestStatus,
    ) -> Notice {
        let ticket = match self.board.begin_transition(credential, request_id, target) {
            Ok(ticket) => ticket,
            Err(err) => return Notice::from_error(&err),
        };

        let result = self
            .client
            .update_status(&ticket.credential, &ticket.request_id, ticket.target)
            .await;

        let Some(outcome) = self.board.complete_transition(ticket, result) else {
            return Notice::from_error(&BoardError::Transition(
                crate::api::UPDATE_FAILED.to_string(),
            ));
        };
        if let Some(refetch) = outcome.refetch {
            self.run_fetch(refetch).await;
        }
        outcome.notice
    }

    pub fn export(&self, options: ExportOptions) -> ExportReport {
        self.board.export(options)
    }

    async fn run_fetch(&mut self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.client.fetch_requests(&ticket.credential).await;
        self.board.complete_fetch(ticket, result)
    }
}
