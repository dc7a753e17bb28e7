//! Shared building blocks for the mechanic service-request board.
//!
//! Both the Yew dashboard and the actix backend depend on this crate, so
//! everything here compiles for native targets and for `wasm32`.
//!
//! - `model`: the wire model (`ServiceRequest`, `RequestStatus`, stats).
//! - `requests`: small request/response bodies exchanged with the backend.
//! - `api`: the HTTP client contract and the `MechanicClient` built on it.
//! - `board`: the Request Board Controller (state, filter, transitions, CSV).
//! - `error`: the `BoardError` taxonomy.

pub mod api;
pub mod board;
pub mod error;
pub mod model;
pub mod requests;

pub use error::{BoardError, Result};
