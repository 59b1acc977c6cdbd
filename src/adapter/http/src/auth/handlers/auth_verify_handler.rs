// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use cryptotrade_auth_web3::{Web3AuthConfig, Web3WalletAuthenticationService};
use dill::Catalog;
use http_common::ApiError;
use serde::{Deserialize, Serialize};

use crate::auth::wallet_authentication_api_error;
use crate::axum_utils::from_catalog_n;
use crate::{AccountResponse, SessionCookieConfig, WalletProofRequest, WalletResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub account: AccountResponse,
    /// Wallet that signed the challenge
    pub wallet: WalletResponse,
    pub access_token: String,
    pub is_new_account: bool,
}

/// Exchange a signed challenge for a session
///
/// The first successful sign-in of an address creates its account. The
/// session token is returned in the body and as an HTTP-only cookie.
#[utoipa::path(
    post,
    path = "/auth/verify",
    request_body = WalletProofRequest,
    responses(
        (status = OK, body = VerifyResponse),
        (status = BAD_REQUEST, body = http_common::ApiErrorResponse),
        (status = UNAUTHORIZED, body = http_common::ApiErrorResponse),
    ),
    tag = "cryptotrade",
    security(())
)]
pub async fn auth_verify_handler(
    Extension(catalog): Extension<Catalog>,
    Json(request): Json<WalletProofRequest>,
) -> Result<(CookieJar, Json<VerifyResponse>), ApiError> {
    let (auth_service, web3_auth_config, cookie_config) = from_catalog_n!(
        catalog,
        dyn Web3WalletAuthenticationService,
        Web3AuthConfig,
        SessionCookieConfig
    );

    let proof = request.into_proof(&web3_auth_config.message_template)?;

    let result = auth_service
        .authenticate(proof)
        .await
        .map_err(wallet_authentication_api_error)?;

    let jar = CookieJar::new().add(cookie_config.session_cookie(result.session.access_token.clone()));

    Ok((
        jar,
        Json(VerifyResponse {
            account: result.account.into(),
            wallet: result.wallet.into(),
            access_token: result.session.access_token,
            is_new_account: result.is_new_account,
        }),
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
