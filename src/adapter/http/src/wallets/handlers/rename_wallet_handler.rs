// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::Path;
use axum::{Extension, Json};
use cryptotrade_accounts::{RenameWalletError, WalletID, WalletRegistry};
use dill::Catalog;
use http_common::{ApiError, IntoApiError};
use serde::Deserialize;

use crate::axum_utils::from_catalog_n;
use crate::{AuthenticatedSession, WalletResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameWalletRequest {
    /// `null` or a blank string clears the nickname
    pub nickname: Option<String>,
}

/// Set the nickname of a wallet of the current account
#[utoipa::path(
    patch,
    path = "/wallets/{id}",
    params(
        ("id" = String, Path, description = "Wallet ID")
    ),
    request_body = RenameWalletRequest,
    responses(
        (status = OK, body = WalletResponse),
        (status = BAD_REQUEST, body = http_common::ApiErrorResponse),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
        (status = NOT_FOUND, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn rename_wallet_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
    Path(wallet_id): Path<WalletID>,
    Json(request): Json<RenameWalletRequest>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet_registry = from_catalog_n!(catalog, dyn WalletRegistry);

    let wallet = wallet_registry
        .rename_wallet(&session.account_id, &wallet_id, request.nickname)
        .await
        .map_err(|e| match e {
            RenameWalletError::NotFound(_) => ApiError::not_found_without_reason(),
            RenameWalletError::InvalidNickname(e) => ApiError::bad_request(e),
            RenameWalletError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(wallet.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
