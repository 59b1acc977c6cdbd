// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_auth_web3::WalletAuthenticationError;
use http_common::{ApiError, IntoApiError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reported for every rejected wallet proof, whatever the cause. Whether the
/// address is registered is never revealed to the client.
#[derive(Error, Debug)]
#[error("Authentication failed")]
pub struct AuthenticationFailedError;

pub(crate) fn wallet_authentication_api_error(e: WalletAuthenticationError) -> ApiError {
    match e {
        WalletAuthenticationError::InvalidInput(e) => ApiError::bad_request(e),
        WalletAuthenticationError::Internal(e) => e.api_err(),
        e @ (WalletAuthenticationError::UnknownChallenge(_)
        | WalletAuthenticationError::InvalidSignature(_)
        | WalletAuthenticationError::SignUpDisabled(_)) => {
            tracing::warn!(error = ?e, error_msg = %e, "Wallet proof rejected");
            ApiError::new_unauthorized_from(AuthenticationFailedError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
