// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use cryptotrade_accounts::{ListWalletsError, WalletRegistry};
use dill::Catalog;
use http_common::{ApiError, IntoApiError};

use crate::axum_utils::from_catalog_n;
use crate::{AuthenticatedSession, WalletResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// List wallets bound to the current account, primary first
#[utoipa::path(
    get,
    path = "/wallets",
    responses(
        (status = OK, body = Vec<WalletResponse>),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn list_wallets_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
) -> Result<Json<Vec<WalletResponse>>, ApiError> {
    let wallet_registry = from_catalog_n!(catalog, dyn WalletRegistry);

    let wallets = wallet_registry
        .list_wallets(&session.account_id)
        .await
        .map_err(|e| match e {
            ListWalletsError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(wallets.into_iter().map(Into::into).collect()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
