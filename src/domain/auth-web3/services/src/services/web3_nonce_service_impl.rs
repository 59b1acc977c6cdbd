// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cryptotrade_accounts::{WalletAccountsConfig, WalletAddress, WalletBindingRepository};
use cryptotrade_auth_web3::*;
use init_on_startup::{InitOnStartup, InitOnStartupMeta};
use internal_error::{InternalError, ResultIntoInternal};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const JOB_CRYPTOTRADE_WEB3_NONCE_CLEANUP: &str = "dev.cryptotrade.web3.nonce_cleanup";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn Web3NonceService)]
#[dill::interface(dyn InitOnStartup)]
#[dill::meta(InitOnStartupMeta {
    job_name: JOB_CRYPTOTRADE_WEB3_NONCE_CLEANUP,
    depends_on: &[],
})]
pub struct Web3NonceServiceImpl {
    nonce_repo: Arc<dyn Web3AuthNonceRepository>,
    wallet_repo: Arc<dyn WalletBindingRepository>,
    auth_config: Arc<Web3AuthConfig>,
    accounts_config: Arc<WalletAccountsConfig>,
    time_source: Arc<dyn SystemTimeSource>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3NonceService for Web3NonceServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(%wallet_address))]
    async fn issue_challenge(
        &self,
        wallet_address: &WalletAddress,
    ) -> Result<IssuedWeb3AuthChallenge, IssueChallengeError> {
        if !self.accounts_config.sign_up_via_wallet {
            let binding = self
                .wallet_repo
                .find_wallet_binding_by_address(wallet_address)
                .await
                .int_err()?;

            if binding.is_none() {
                return Err(IssueChallengeError::NotFound(UnregisteredWalletError {
                    wallet_address: wallet_address.clone(),
                }));
            }
        }

        let now = self.time_source.now();

        // Abandoned challenges are swept on every issue
        let removed = self.nonce_repo.cleanup_expired_nonces(now).await.int_err()?;
        if removed > 0 {
            tracing::debug!(removed, "Expired challenges purged");
        }

        let challenge =
            Web3AuthChallenge::new(wallet_address.clone(), now, self.auth_config.nonce_ttl);

        self.nonce_repo.set_nonce(&challenge).await.int_err()?;

        tracing::debug!(expires_at = %challenge.expires_at, "Challenge issued");

        let message = self.auth_config.message_template.render(&challenge.nonce);

        Ok(IssuedWeb3AuthChallenge { challenge, message })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl InitOnStartup for Web3NonceServiceImpl {
    #[tracing::instrument(level = "debug", skip_all, name = "Web3NonceServiceImpl::run_initialization")]
    async fn run_initialization(&self) -> Result<(), InternalError> {
        let now = self.time_source.now();

        let removed = self
            .nonce_repo
            .cleanup_expired_nonces(now)
            .await
            .int_err()?;

        tracing::info!(removed, "Expired challenges purged");

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
