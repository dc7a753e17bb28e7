//! View rendering for the mechanic dashboard.
//!
//! Layout, top to bottom: header with Export/Refresh, the three stat cards,
//! the tab bar with search box and status dropdown, then one card per visible
//! request. A full-page spinner replaces everything during the very first
//! load, and a failed load shows an error page with a Retry button.

use common::board::filter::{StatusFilter, Tab, SEARCH_PLACEHOLDER};
use common::model::{RequestStatus, ServiceRequest};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::stats_grid::{StatCard, StatsGrid};

use super::dialogs::details::{details_dialog, transition_button};
use super::helpers::{format_count, requested_at, status_badge_class};
use super::messages::Msg;
use super::state::MechanicDashboard;

pub fn view(component: &MechanicDashboard, ctx: &Context<MechanicDashboard>) -> Html {
    let link = ctx.link();
    let board = &component.board;

    if board.is_loading() && board.requests().is_empty() && !board.is_transition_pending() {
        return html! {
            <div class="page-center">
                <div class="spinner" />
            </div>
        };
    }

    if let Some(message) = board.error() {
        return html! {
            <div class="page-center">
                <h2>{ "Something went wrong" }</h2>
                <p class="muted">{ message.to_string() }</p>
                <button class="btn btn-primary" onclick={link.callback(|_| Msg::Refresh)}>
                    { "Retry" }
                </button>
            </div>
        };
    }

    html! {
        <div class="dashboard">
            { build_header(component, link) }
            { build_stats(component) }
            { build_filters(component, link) }
            { build_request_list(component, link) }
            { details_dialog(component, link) }
        </div>
    }
}

fn build_header(component: &MechanicDashboard, link: &Scope<MechanicDashboard>) -> Html {
    let greeting = component
        .board
        .profile()
        .map(|p| p.name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| format!("Welcome back, {}", name))
        .unwrap_or_else(|| "Manage your service requests".to_string());

    html! {
        <div class="dashboard-header">
            <div>
                <h1>{ "Mechanic Dashboard" }</h1>
                <p class="muted">{ greeting }</p>
            </div>
            <div class="header-actions">
                <button class="btn" onclick={link.callback(|_| Msg::Export)}>
                    { "Export Completed" }
                </button>
                <button
                    class="btn"
                    disabled={component.board.is_loading()}
                    onclick={link.callback(|_| Msg::Refresh)}
                >
                    { "Refresh" }
                </button>
            </div>
        </div>
    }
}

fn build_stats(component: &MechanicDashboard) -> Html {
    let stats = component.board.stats();
    html! {
        <StatsGrid columns={3}>
            <StatCard
                title="Total Requests"
                value={format_count(stats.total_requests)}
                hint={AttrValue::from("All time")}
            />
            <StatCard
                title="Active Requests"
                value={format_count(stats.active_requests)}
                hint={AttrValue::from("Pending or in progress")}
            />
            <StatCard
                title="Completed Services"
                value={format_count(stats.completed_services)}
            />
        </StatsGrid>
    }
}

fn build_filters(component: &MechanicDashboard, link: &Scope<MechanicDashboard>) -> Html {
    let filter = component.board.filter();

    let on_search = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetQuery(input.value())
    });
    let on_status = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetStatusFilter(StatusFilter::from_key(&select.value()))
    });

    html! {
        <div class="filters">
            <div class="tab-bar">
                { for Tab::ALL.iter().map(|tab| {
                    let tab = *tab;
                    html! {
                        <button
                            class={classes!("tab-btn", (filter.tab == tab).then_some("active"))}
                            onclick={link.callback(move |_| Msg::SetTab(tab))}
                        >
                            { tab.label() }
                        </button>
                    }
                }) }
            </div>
            <input
                class="search"
                type="search"
                placeholder={SEARCH_PLACEHOLDER}
                value={filter.query.clone()}
                oninput={on_search}
            />
            <select class="status-select" onchange={on_status}>
                <option value={StatusFilter::All.key()} selected={filter.status == StatusFilter::All}>
                    { "All Statuses" }
                </option>
                { for RequestStatus::ALL.iter().map(|status| {
                    let option = StatusFilter::Only(*status);
                    html! {
                        <option value={option.key()} selected={filter.status == option}>
                            { status.as_str() }
                        </option>
                    }
                }) }
            </select>
        </div>
    }
}

fn build_request_list(component: &MechanicDashboard, link: &Scope<MechanicDashboard>) -> Html {
    let visible = component.board.visible();
    if visible.is_empty() {
        let has_query = !component.board.filter().query.trim().is_empty();
        return html! {
            <div class="empty-state">
                <h3>{ "No service requests found" }</h3>
                {
                    if has_query {
                        html! { <p class="muted">{ "Try adjusting your search or filter criteria" }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
        };
    }

    let busy = component.board.is_loading();
    html! {
        <div class="request-list">
            { for visible.into_iter().map(|request| request_card(request, busy, link)) }
        </div>
    }
}

fn request_card(request: &ServiceRequest, busy: bool, link: &Scope<MechanicDashboard>) -> Html {
    let id = request.id.clone();
    let on_details = link.callback(move |_| Msg::OpenDetails(id.clone()));
    let customer = match request.customer_name().trim() {
        "" => "Unknown customer",
        name => name,
    };

    html! {
        <div class="card request-card">
            <div class="request-card-header">
                <div>
                    <h3>{ customer }</h3>
                    <p class="muted">{ request.vehicle_descriptor() }</p>
                </div>
                <span class={status_badge_class(request.status)}>{ request.status.as_str() }</span>
            </div>
            <dl class="request-facts">
                <dt>{ "Service Type" }</dt>
                <dd>{ request.service_type.clone() }</dd>
                <dt>{ "Location" }</dt>
                <dd>{ request.address().to_string() }</dd>
                <dt>{ "Requested" }</dt>
                <dd>{ requested_at(request) }</dd>
            </dl>
            <div class="request-actions">
                <button class="btn" onclick={on_details}>{ "View Details" }</button>
                { for request.status.next_statuses().iter().map(|target| {
                    transition_button(&request.id, *target, busy, link)
                }) }
            </div>
        </div>
    }
}
