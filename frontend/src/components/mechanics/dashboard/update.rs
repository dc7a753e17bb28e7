//! Update function for the mechanic dashboard.
//!
//! Elm-style: `update` receives the component, its `Context` and a `Msg`,
//! mutates the `RequestBoard` and returns whether the view must re-render.
//! Network work is spawned with `spawn_local` and reported back through the
//! `*Finished` messages, carrying the ticket the board handed out so stale
//! answers can be recognised.

use common::board::{FetchOutcome, FetchTicket, Notice, TransitionTicket};
use log::{error, info};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::storage::stored_credential;
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{download_csv, export_options, show_notice};
use super::messages::Msg;
use super::state::MechanicDashboard;

pub fn update(
    component: &mut MechanicDashboard,
    ctx: &Context<MechanicDashboard>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Refresh => {
            // Without a token the board records the error itself.
            if let Ok(ticket) = component.board.begin_fetch(stored_credential()) {
                spawn_fetch(component, ctx, ticket);
            }
            true
        }
        Msg::FetchFinished(ticket, result) => {
            match component.board.complete_fetch(ticket, result) {
                FetchOutcome::Loaded(count) => {
                    info!("Loaded {} service requests", count);
                    true
                }
                FetchOutcome::Failed(_) => true,
                FetchOutcome::Superseded => false,
            }
        }
        Msg::UpdateStatus { request_id, status } => {
            let started = component
                .board
                .begin_transition(stored_credential(), &request_id, status);
            match started {
                Ok(ticket) => {
                    spawn_transition(component, ctx, ticket);
                    true
                }
                Err(err) => {
                    show_notice(&Notice::from_error(&err));
                    false
                }
            }
        }
        Msg::TransitionFinished(ticket, result) => {
            let Some(outcome) = component.board.complete_transition(ticket, result) else {
                return false;
            };
            if outcome.refetch.is_some() {
                close_top_sheet(component.details_dialog_ref.clone());
            }
            show_notice(&outcome.notice);
            if let Some(refetch) = outcome.refetch {
                spawn_fetch(component, ctx, refetch);
            }
            true
        }
        Msg::SetQuery(query) => {
            component.board.set_query(query);
            true
        }
        Msg::SetTab(tab) => {
            if component.board.filter().tab == tab {
                return false;
            }
            component.board.set_tab(tab);
            true
        }
        Msg::SetStatusFilter(status) => {
            component.board.set_status_filter(status);
            true
        }
        Msg::OpenDetails(request_id) => {
            component.board.open_details(&request_id);
            open_top_sheet(component.details_dialog_ref.clone());
            true
        }
        Msg::CloseDetails => {
            close_top_sheet(component.details_dialog_ref.clone());
            component.board.close_details();
            true
        }
        Msg::Export => {
            let report = component.board.export(export_options());
            if let Some(file) = &report.file {
                if let Err(err) = download_csv(file) {
                    error!("Error exporting data: {}", err);
                    show_notice(&Notice::destructive(
                        "Export Failed",
                        "Failed to export data. Please try again.",
                    ));
                    return false;
                }
            }
            show_notice(&report.notice);
            false
        }
    }
}

fn spawn_fetch(
    component: &MechanicDashboard,
    ctx: &Context<MechanicDashboard>,
    ticket: FetchTicket,
) {
    let client = component.client.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = client.fetch_requests(&ticket.credential).await;
        link.send_message(Msg::FetchFinished(ticket, result));
    });
}

fn spawn_transition(
    component: &MechanicDashboard,
    ctx: &Context<MechanicDashboard>,
    ticket: TransitionTicket,
) {
    let client = component.client.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = client
            .update_status(&ticket.credential, &ticket.request_id, ticket.target)
            .await;
        link.send_message(Msg::TransitionFinished(ticket, result));
    });
}
