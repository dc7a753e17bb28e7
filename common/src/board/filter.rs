//! View filter: text search plus the tab and status-filter facets.

use crate::model::{RequestStatus, ServiceRequest};

/// Coarse status grouping driving the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pending,
    Active,
    Completed,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Pending, Tab::Active, Tab::Completed];

    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            Tab::Pending => status == RequestStatus::Pending,
            Tab::Active => matches!(
                status,
                RequestStatus::Accepted | RequestStatus::OnTheWay | RequestStatus::InProgress
            ),
            Tab::Completed => status == RequestStatus::Completed,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Pending => "pending",
            Tab::Active => "active",
            Tab::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Pending => "Pending",
            Tab::Active => "Active",
            Tab::Completed => "Completed",
        }
    }

    pub fn from_key(key: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.key() == key)
    }
}

/// Secondary status dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    /// `All` never selects anything on its own; it only defers to the tab.
    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => false,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn from_key(key: &str) -> StatusFilter {
        key.parse::<RequestStatus>()
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }
}

/// Search box hint; names the fields `ViewFilter::matches_query` looks at.
pub const SEARCH_PLACEHOLDER: &str = "Search by customer, license plate or service type...";

/// Inputs of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilter {
    pub query: String,
    pub tab: Tab,
    pub status: StatusFilter,
}

impl ViewFilter {
    /// Case-insensitive substring match on customer name, plate and service type.
    pub fn matches_query(&self, request: &ServiceRequest) -> bool {
        let needle = self.query.to_lowercase();
        [
            request.customer_name(),
            request.license_plate(),
            request.service_type.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// The two status facets are OR-ed, then AND-ed with the text match.
    pub fn matches(&self, request: &ServiceRequest) -> bool {
        self.matches_query(request)
            && (self.tab.matches(request.status) || self.status.matches(request.status))
    }

    /// Matching requests in collection order.
    pub fn apply<'a>(&self, requests: &'a [ServiceRequest]) -> Vec<&'a ServiceRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}
