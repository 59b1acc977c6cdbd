// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use cryptotrade_accounts::{AccountID, WalletAddress};
use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// What a valid session token asserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSubject {
    pub account_id: AccountID,
    /// Wallet that was used to sign in
    pub wallet_address: WalletAddress,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(feature = "testing", mockall::automock)]
pub trait SessionTokenService: Send + Sync {
    fn create_session(
        &self,
        account_id: &AccountID,
        wallet_address: &WalletAddress,
    ) -> Result<SessionToken, InternalError>;

    fn decode_session(&self, access_token: &str) -> Result<SessionSubject, SessionTokenError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Invalid session token")]
    Invalid(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Expired session token")]
    Expired,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
