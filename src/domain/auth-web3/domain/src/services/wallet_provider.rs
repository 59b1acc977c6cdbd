// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::{WalletAddress, WalletType};
use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Client side of the challenge: something holding wallet keys that can
/// list its addresses and sign the challenge message with them
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    fn wallet_type(&self) -> WalletType;

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletProviderError>;

    /// Signature encoded the way the matching verifier expects it
    async fn sign_message(
        &self,
        wallet_address: &WalletAddress,
        message: &str,
    ) -> Result<String, WalletProviderError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum WalletProviderError {
    #[error("Wallet '{wallet_address}' is not managed by this provider")]
    UnknownAccount { wallet_address: WalletAddress },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
