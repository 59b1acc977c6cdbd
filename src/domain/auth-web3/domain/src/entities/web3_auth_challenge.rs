// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};
use cryptotrade_accounts::WalletAddress;

use crate::Web3AuthNonce;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Pending authentication attempt for a wallet address.
/// At most one challenge exists per address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Web3AuthChallenge {
    pub wallet_address: WalletAddress,
    pub nonce: Web3AuthNonce,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Web3AuthChallenge {
    pub fn new(wallet_address: WalletAddress, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            wallet_address,
            nonce: Web3AuthNonce::new(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
