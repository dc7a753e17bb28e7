//! Properties for the `MechanicDashboard` component.

use crate::config::API_BASE_URL;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MechanicDashboardProps {
    /// Prefix for the `/api/mechanic` calls. Defaults to same-origin.
    #[prop_or(AttrValue::Static(API_BASE_URL))]
    pub api_base_url: AttrValue,
}
