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
use cryptotrade_accounts::{GetWalletError, RemoveWalletError, WalletID, WalletRegistry};
use dill::Catalog;
use http::StatusCode;
use http_common::{ApiError, IntoApiError};

use crate::AuthenticatedSession;
use crate::axum_utils::from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Unbind a wallet from the current account
#[utoipa::path(
    delete,
    path = "/wallets/{id}",
    params(
        ("id" = String, Path, description = "Wallet ID")
    ),
    responses(
        (status = NO_CONTENT),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
        (status = NOT_FOUND, body = http_common::ApiErrorResponse),
        (status = CONFLICT, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn remove_wallet_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
    Path(wallet_id): Path<WalletID>,
) -> Result<StatusCode, ApiError> {
    let wallet_registry = from_catalog_n!(catalog, dyn WalletRegistry);

    let wallet = wallet_registry
        .get_wallet(&wallet_id)
        .await
        .map_err(|e| match e {
            GetWalletError::NotFound(_) => ApiError::not_found_without_reason(),
            GetWalletError::Internal(e) => e.api_err(),
        })?;

    // Wallets of other accounts are indistinguishable from missing ones
    if wallet.account_id != session.account_id {
        return Err(ApiError::not_found_without_reason());
    }

    wallet_registry
        .remove_wallet(&wallet_id)
        .await
        .map_err(|e| match e {
            RemoveWalletError::NotFound(e) => ApiError::not_found(e),
            RemoveWalletError::CannotRemoveLastWallet(e) => ApiError::conflict(e),
            RemoveWalletError::Internal(e) => e.api_err(),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
