//! Mechanic dashboard: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and helpers.
//!
//! On first render the request list is loaded with the token found in
//! `localStorage`; afterwards every load is user triggered (Refresh, Retry,
//! or the automatic re-fetch after a status change).

use yew::prelude::*;

mod dialogs;
mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::MechanicDashboardProps;
pub use state::MechanicDashboard;

impl Component for MechanicDashboard {
    type Message = Msg;
    type Properties = MechanicDashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        MechanicDashboard::new(&ctx.props().api_base_url)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Refresh);
        }
    }
}
