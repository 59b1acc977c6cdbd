// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use cryptotrade_accounts::{GetPrimaryWalletError, WalletRegistry};
use dill::Catalog;
use http_common::{ApiError, IntoApiError};

use crate::axum_utils::from_catalog_n;
use crate::{AuthenticatedSession, WalletResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Primary wallet of the current account
#[utoipa::path(
    get,
    path = "/wallets/primary",
    responses(
        (status = OK, body = WalletResponse),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
        (status = NOT_FOUND, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn get_primary_wallet_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet_registry = from_catalog_n!(catalog, dyn WalletRegistry);

    let wallet = wallet_registry
        .get_primary_wallet(&session.account_id)
        .await
        .map_err(|e| match e {
            GetPrimaryWalletError::Internal(e) => e.api_err(),
        })?
        .ok_or_else(ApiError::not_found_without_reason)?;

    Ok(Json(wallet.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
