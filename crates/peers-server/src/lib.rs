// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server for PEERS administrator operations.
//!
//! Routes:
//! - `POST /api/admin/users` - provision a user (admin only)
//! - `GET /health` - database liveness

pub mod api;
pub mod error;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use error::{ApiError, ErrorBody, ErrorResponse};
pub use peers_server_config::ServerConfig;
