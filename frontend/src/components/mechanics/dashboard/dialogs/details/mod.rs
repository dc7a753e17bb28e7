use crate::components::mechanics::dashboard::helpers::{requested_at, status_badge_class};
use crate::components::mechanics::dashboard::{MechanicDashboard, Msg};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;
use common::model::{RequestStatus, ServiceRequest};
use yew::html::Scope;
use yew::prelude::*;

/// Full record of the selected request with the moves it still allows.
pub fn details_dialog(component: &MechanicDashboard, link: &Scope<MechanicDashboard>) -> Html {
    let dialog_ref = component.details_dialog_ref.clone();
    let on_close = link.callback(|_| Msg::CloseDetails);

    let body = match component.board.selected() {
        Some(request) => details_body(request, component.board.is_loading(), link),
        None => html! {},
    };

    html! {
        <YwMaterialTopSheet node_ref={dialog_ref}>
            <div class="dialog">
                <div class="dialog-header">
                    <h2>{ "Service Request Details" }</h2>
                    <button class="icon-btn" title="Close" onclick={on_close}>{ "✕" }</button>
                </div>
                { body }
            </div>
        </YwMaterialTopSheet>
    }
}

fn details_body(request: &ServiceRequest, busy: bool, link: &Scope<MechanicDashboard>) -> Html {
    let customer = request.customer.clone().unwrap_or_default();
    let vehicle = request.vehicle.clone().unwrap_or_default();

    html! {
        <div class="dialog-body">
            <div class="dialog-row">
                <span class={status_badge_class(request.status)}>{ request.status.as_str() }</span>
                <span class="muted">{ format!("Requested {}", requested_at(request)) }</span>
            </div>

            <section>
                <h3>{ "Customer" }</h3>
                <p>{ or_dash(&customer.name) }</p>
                <p class="muted">{ or_dash(&customer.mobile_number) }</p>
            </section>

            <section>
                <h3>{ "Vehicle" }</h3>
                <p>{ format!("{} {} {}", vehicle.year, vehicle.make, vehicle.model).trim().to_string() }</p>
                <p class="muted">{ format!("License plate: {}", or_dash(&vehicle.license_plate)) }</p>
            </section>

            <section>
                <h3>{ "Service" }</h3>
                <p>{ or_dash(&request.service_type) }</p>
                <p class="muted">{ or_dash(&request.description) }</p>
            </section>

            <section>
                <h3>{ "Location" }</h3>
                <p>{ or_dash(request.address()) }</p>
            </section>

            <div class="dialog-actions">
                { for request.status.next_statuses().iter().map(|target| {
                    transition_button(&request.id, *target, busy, link)
                }) }
            </div>
        </div>
    }
}

/// Button sending `target` for `request_id`; disabled while anything loads.
pub fn transition_button(
    request_id: &str,
    target: RequestStatus,
    busy: bool,
    link: &Scope<MechanicDashboard>,
) -> Html {
    let (label, class) = match target {
        RequestStatus::Accepted => ("Accept", "btn btn-primary"),
        RequestStatus::Rejected => ("Reject", "btn btn-destructive"),
        RequestStatus::Completed => ("Mark as Completed", "btn btn-primary"),
        other => (other.as_str(), "btn"),
    };
    let id = request_id.to_string();
    let onclick = link.callback(move |_| Msg::UpdateStatus {
        request_id: id.clone(),
        status: target,
    });

    html! {
        <button class={class} disabled={busy} {onclick}>{ label }</button>
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
