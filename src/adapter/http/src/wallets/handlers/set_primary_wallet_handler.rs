// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::Extension;
use axum::extract::Path;
use cryptotrade_accounts::{SetPrimaryWalletError, WalletID, WalletRegistry};
use dill::Catalog;
use http::StatusCode;
use http_common::{ApiError, IntoApiError};

use crate::AuthenticatedSession;
use crate::axum_utils::from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Make a wallet of the current account its primary one
#[utoipa::path(
    put,
    path = "/wallets/{id}/primary",
    params(
        ("id" = String, Path, description = "Wallet ID")
    ),
    responses(
        (status = NO_CONTENT),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
        (status = NOT_FOUND, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn set_primary_wallet_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
    Path(wallet_id): Path<WalletID>,
) -> Result<StatusCode, ApiError> {
    let wallet_registry = from_catalog_n!(catalog, dyn WalletRegistry);

    wallet_registry
        .set_primary(&session.account_id, &wallet_id)
        .await
        .map_err(|e| match e {
            SetPrimaryWalletError::NotFound(e) => ApiError::not_found(e),
            SetPrimaryWalletError::Internal(e) => e.api_err(),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
