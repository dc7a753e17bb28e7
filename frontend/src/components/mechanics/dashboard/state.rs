//! Component state for the mechanic dashboard.

use crate::transport::GlooTransport;
use common::api::MechanicClient;
use common::board::RequestBoard;
use yew::prelude::*;

/// Main state container for the `MechanicDashboard`.
///
/// The `RequestBoard` is the single source of truth for requests, stats,
/// filter inputs and the selected request. Everything else is plumbing.
pub struct MechanicDashboard {
    /// Collection, derived stats, filter and in-flight bookkeeping.
    pub board: RequestBoard,

    /// Typed client for the mechanic endpoints.
    pub client: MechanicClient<GlooTransport>,

    /// Reference to the request details top-sheet container.
    pub details_dialog_ref: NodeRef,

    /// Guard to run the initial load only once.
    pub loaded: bool,
}

impl MechanicDashboard {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            board: RequestBoard::new(),
            client: MechanicClient::new(GlooTransport, api_base_url),
            details_dialog_ref: NodeRef::default(),
            loaded: false,
        }
    }
}
