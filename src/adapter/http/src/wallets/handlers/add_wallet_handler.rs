// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use cryptotrade_accounts::{AddWalletError, WalletRegistry};
use cryptotrade_auth_web3::{Web3AuthConfig, Web3WalletAuthenticationService};
use dill::Catalog;
use http::StatusCode;
use http_common::{ApiError, IntoApiError};

use crate::auth::wallet_authentication_api_error;
use crate::axum_utils::from_catalog_n;
use crate::{AuthenticatedSession, WalletProofRequest, WalletResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Bind another wallet to the current account
///
/// Control over the new address is proven the same way as on sign-in: by
/// signing a challenge issued for it.
#[utoipa::path(
    post,
    path = "/wallets",
    request_body = WalletProofRequest,
    responses(
        (status = CREATED, body = WalletResponse),
        (status = BAD_REQUEST, body = http_common::ApiErrorResponse),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
        (status = CONFLICT, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(("session" = []))
)]
pub async fn add_wallet_handler(
    Extension(catalog): Extension<Catalog>,
    session: AuthenticatedSession,
    Json(request): Json<WalletProofRequest>,
) -> Result<(StatusCode, Json<WalletResponse>), ApiError> {
    let (auth_service, wallet_registry, web3_auth_config) = from_catalog_n!(
        catalog,
        dyn Web3WalletAuthenticationService,
        dyn WalletRegistry,
        Web3AuthConfig
    );

    let proof = request.into_proof(&web3_auth_config.message_template)?;
    let wallet_address = proof.wallet_address.clone();
    let wallet_type = proof.wallet_type;

    auth_service
        .verify_wallet_ownership(proof)
        .await
        .map_err(wallet_authentication_api_error)?;

    let wallet = wallet_registry
        .add_wallet(&session.account_id, &wallet_address, wallet_type)
        .await
        .map_err(|e| match e {
            AddWalletError::InvalidInput(e) => ApiError::bad_request(e),
            AddWalletError::DuplicateAddress(e) => ApiError::conflict(e),
            AddWalletError::AccountNotFound(e) => ApiError::new_unauthorized_from(e),
            AddWalletError::Internal(e) => e.api_err(),
        })?;

    Ok((StatusCode::CREATED, Json(wallet.into())))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
