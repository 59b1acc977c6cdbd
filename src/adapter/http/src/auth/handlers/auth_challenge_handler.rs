// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use cryptotrade_accounts::WalletAddress;
use cryptotrade_auth_web3::{IssueChallengeError, Web3NonceService};
use dill::Catalog;
use http_common::{ApiError, IntoApiError};
use serde::{Deserialize, Serialize};

use crate::axum_utils::from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub nonce: String,
    /// Exact text the wallet has to sign
    pub message: String,
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTime<Utc>,
}

/// Issue a sign-in challenge for a wallet
#[utoipa::path(
    post,
    path = "/auth/challenge",
    request_body = ChallengeRequest,
    responses(
        (status = OK, body = ChallengeResponse),
        (status = BAD_REQUEST, body = http_common::ApiErrorResponse),
        (status = NOT_FOUND, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(())
)]
pub async fn auth_challenge_handler(
    Extension(catalog): Extension<Catalog>,
    Json(request): Json<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let nonce_service = from_catalog_n!(catalog, dyn Web3NonceService);

    let wallet_address = WalletAddress::parse(&request.address).map_err(ApiError::bad_request)?;

    let issued = nonce_service
        .issue_challenge(&wallet_address)
        .await
        .map_err(|e| match e {
            IssueChallengeError::NotFound(e) => ApiError::not_found(e),
            IssueChallengeError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(ChallengeResponse {
        nonce: issued.challenge.nonce.to_string(),
        message: issued.message,
        expires_at: issued.challenge.expires_at,
    }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
