// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod authenticated_session;
pub use authenticated_session::*;

mod axum_utils;

mod dto;
pub use dto::*;

mod session_cookie;
pub use session_cookie::*;

pub mod auth;
pub mod general;
pub mod wallets;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// All routes of the API, ready to be mounted at the server root
pub fn root_router() -> utoipa_axum::router::OpenApiRouter {
    utoipa_axum::router::OpenApiRouter::new()
        .merge(auth::root_router())
        .merge(general::root_router())
        .merge(wallets::root_router())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
