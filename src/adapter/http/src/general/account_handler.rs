// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use cryptotrade_accounts::{AccountRepository, GetAccountByIdError};
use dill::Catalog;
use http_common::{ApiError, IntoApiError};

use crate::axum_utils::from_catalog_n;
use crate::{AccountResponse, AuthenticatedSession};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Get the account of the current session
#[utoipa::path(
    get,
    path = "/accounts/me",
    responses(
        (status = OK, body = AccountResponse),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn account_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
) -> Result<Json<AccountResponse>, ApiError> {
    let account_repo = from_catalog_n!(catalog, dyn AccountRepository);

    let account = account_repo
        .get_account_by_id(&session.account_id)
        .await
        .map_err(|e| match e {
            // A valid token of a deleted account
            GetAccountByIdError::NotFound(e) => ApiError::new_unauthorized_from(e),
            GetAccountByIdError::Internal(e) => e.api_err(),
        })?;

    tracing::debug!(account_id = %account.id, "Resolved current account");

    Ok(Json(account.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
