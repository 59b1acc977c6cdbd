// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::Extension;
use axum_extra::extract::cookie::CookieJar;
use dill::Catalog;
use http::StatusCode;

use crate::SessionCookieConfig;
use crate::axum_utils::from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Drop the session cookie
///
/// Sessions are stateless tokens: clients holding a bearer token should
/// simply discard it.
#[utoipa::path(
    post,
    path = "/auth/signout",
    responses((status = NO_CONTENT)),
    tag = "cryptotrade",
    security(())
)]
pub async fn auth_signout_handler(
    Extension(catalog): Extension<Catalog>,
) -> (StatusCode, CookieJar) {
    let cookie_config = from_catalog_n!(catalog, SessionCookieConfig);

    (
        StatusCode::NO_CONTENT,
        CookieJar::new().add(cookie_config.removal_cookie()),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
