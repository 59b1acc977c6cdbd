// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use cryptotrade_accounts::WalletAddress;
use dill::*;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryWeb3AuthNonceRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    challenges_by_wallet: HashMap<WalletAddress, Web3AuthChallenge>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn Web3AuthNonceRepository)]
#[scope(Singleton)]
impl InMemoryWeb3AuthNonceRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3AuthNonceRepository for InMemoryWeb3AuthNonceRepository {
    async fn set_nonce(&self, challenge: &Web3AuthChallenge) -> Result<(), SetNonceError> {
        let mut guard = self.state.lock().unwrap();

        guard
            .challenges_by_wallet
            .insert(challenge.wallet_address.clone(), challenge.clone());

        Ok(())
    }

    async fn get_nonce(
        &self,
        wallet_address: &WalletAddress,
    ) -> Result<Web3AuthChallenge, GetNonceError> {
        let guard = self.state.lock().unwrap();

        guard
            .challenges_by_wallet
            .get(wallet_address)
            .cloned()
            .ok_or_else(|| GetNonceError::NotFound {
                wallet: wallet_address.clone(),
            })
    }

    async fn rotate_nonce(
        &self,
        expected: &Web3AuthNonce,
        replacement: &Web3AuthChallenge,
    ) -> Result<(), RotateNonceError> {
        let mut guard = self.state.lock().unwrap();

        let wallet = &replacement.wallet_address;
        let Some(current) = guard.challenges_by_wallet.get_mut(wallet) else {
            return Err(RotateNonceError::NotFound {
                wallet: wallet.clone(),
            });
        };

        if current.nonce != *expected {
            return Err(RotateNonceError::Stale {
                wallet: wallet.clone(),
            });
        }

        *current = replacement.clone();

        Ok(())
    }

    async fn cleanup_expired_nonces(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, CleanupExpiredNoncesError> {
        let mut guard = self.state.lock().unwrap();

        let count_before = guard.challenges_by_wallet.len();
        guard
            .challenges_by_wallet
            .retain(|_, challenge| !challenge.is_expired(now));

        Ok(count_before - guard.challenges_by_wallet.len())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
