// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use cryptotrade_accounts::{AccountID, WalletAddress};
use cryptotrade_auth_web3::SessionTokenService;
use dill::Catalog;
use headers::authorization::Bearer;
use headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use http_common::ApiError;
use internal_error::ResultIntoInternal;

use crate::SESSION_COOKIE_NAME;
use crate::axum_utils::from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Caller identity resolved from the session token.
///
/// The token is taken from the `Authorization: Bearer` header when present,
/// otherwise from the session cookie. Any failure rejects the request with
/// `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub account_id: AccountID,
    pub wallet_address: WalletAddress,
    pub access_token: String,
}

impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let catalog = parts
            .extensions
            .get::<Catalog>()
            .cloned()
            .ok_or_else(|| "Catalog is not installed on the router".to_string())
            .int_err()?;

        let Some(access_token) = extract_access_token(parts) else {
            tracing::debug!("Request carries no session token");
            return Err(ApiError::new_unauthorized());
        };

        let session_token_service = from_catalog_n!(catalog, dyn SessionTokenService);

        match session_token_service.decode_session(&access_token) {
            Ok(subject) => Ok(Self {
                account_id: subject.account_id,
                wallet_address: subject.wallet_address,
                access_token,
            }),
            Err(e) => {
                tracing::warn!(error = ?e, error_msg = %e, "Session token rejected");
                Err(ApiError::new_unauthorized())
            }
        }
    }
}

fn extract_access_token(parts: &Parts) -> Option<String> {
    if let Some(bearer) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
