use common::board::filter::{StatusFilter, Tab};
use common::board::{FetchTicket, TransitionTicket};
use common::model::{MechanicProfile, RequestStatus, ServiceRequest};
use common::BoardError;

pub type FetchResult = Result<(Vec<ServiceRequest>, Option<MechanicProfile>), BoardError>;

pub enum Msg {
    Refresh,
    FetchFinished(FetchTicket, FetchResult),
    UpdateStatus { request_id: String, status: RequestStatus },
    TransitionFinished(TransitionTicket, Result<(), BoardError>),
    SetQuery(String),
    SetTab(Tab),
    SetStatusFilter(StatusFilter),
    OpenDetails(String),
    CloseDetails,
    Export,
}
