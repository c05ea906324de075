//! Okta provider client - wraps the Okta management REST API.

mod api;
mod client;
mod config;

pub use client::OktaClient;
pub use config::{AuthorizationMode, HttpPoolConfig, OktaConfig};

#[cfg(test)]
mod tests;
