//! Life-insurance quote intake: REST API and client-side form logic.
//!
//! - [`startup`] wires config, store and middleware into an axum [`Router`](axum::Router)
//! - [`services::quotes`] holds the submission pipeline and live validation endpoint
//! - [`client`] drives the quote form against the API

pub mod client;
pub mod config;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod startup;
