// SPDX-License-Identifier: MIT

//! Wayfarer: backend API for a small travel site.
//!
//! Provides Google sign-in with signed session tokens and contact-form
//! persistence. Sign-in is an optional capability: when the OAuth
//! configuration is incomplete, the rest of the API keeps working and
//! the login endpoints answer with a not-configured error.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;
use services::{GoogleAuthService, SessionIssuer};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    /// `None` when the activation gate kept Google sign-in disabled
    pub google: Option<GoogleAuthService>,
    pub sessions: SessionIssuer,
}
