// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use cryptotrade_accounts::{
    IncompatibleWalletTypeError,
    ProvisionWalletAccountError,
    ProvisionWalletAccountUseCase,
    WalletBindingRepository,
    WalletType,
};
use cryptotrade_auth_web3::*;
use internal_error::{InternalError, ResultIntoInternal};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct Web3WalletAuthenticationServiceImpl {
    verifiers_by_type: HashMap<WalletType, Arc<dyn Web3SignatureVerifier>>,
    nonce_repo: Arc<dyn Web3AuthNonceRepository>,
    wallet_repo: Arc<dyn WalletBindingRepository>,
    provision_wallet_account_use_case: Arc<dyn ProvisionWalletAccountUseCase>,
    session_token_service: Arc<dyn SessionTokenService>,
    auth_config: Arc<Web3AuthConfig>,
    time_source: Arc<dyn SystemTimeSource>,
}

#[dill::component(pub)]
#[dill::interface(dyn Web3WalletAuthenticationService)]
impl Web3WalletAuthenticationServiceImpl {
    pub fn new(
        verifiers: Vec<Arc<dyn Web3SignatureVerifier>>,
        nonce_repo: Arc<dyn Web3AuthNonceRepository>,
        wallet_repo: Arc<dyn WalletBindingRepository>,
        provision_wallet_account_use_case: Arc<dyn ProvisionWalletAccountUseCase>,
        session_token_service: Arc<dyn SessionTokenService>,
        auth_config: Arc<Web3AuthConfig>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        let mut verifiers_by_type = HashMap::new();

        for verifier in verifiers {
            let wallet_type = verifier.wallet_type();
            if verifiers_by_type.insert(wallet_type, verifier).is_some() {
                panic!("Duplicate signature verifier for wallet type: {wallet_type}");
            }
        }

        Self {
            verifiers_by_type,
            nonce_repo,
            wallet_repo,
            provision_wallet_account_use_case,
            session_token_service,
            auth_config,
            time_source,
        }
    }

    fn resolve_verifier(
        &self,
        wallet_type: WalletType,
    ) -> Result<&dyn Web3SignatureVerifier, InternalError> {
        match self.verifiers_by_type.get(&wallet_type) {
            Some(verifier) => Ok(verifier.as_ref()),
            None => InternalError::bail(format!(
                "No signature verifier registered for wallet type: {wallet_type}"
            )),
        }
    }

    /// Checks the proof against the pending challenge without consuming it
    async fn check_proof(
        &self,
        proof: &WalletSignatureProof,
    ) -> Result<Web3AuthChallenge, WalletAuthenticationError> {
        if proof.wallet_address.family() != proof.wallet_type.address_family() {
            return Err(WalletAuthenticationError::InvalidInput(
                IncompatibleWalletTypeError {
                    address: proof.wallet_address.clone(),
                    wallet_type: proof.wallet_type,
                },
            ));
        }

        let unknown_challenge = || {
            WalletAuthenticationError::UnknownChallenge(UnknownChallengeError {
                wallet_address: proof.wallet_address.clone(),
            })
        };

        let challenge = match self.nonce_repo.get_nonce(&proof.wallet_address).await {
            Ok(challenge) => challenge,
            Err(GetNonceError::NotFound { .. }) => return Err(unknown_challenge()),
            Err(GetNonceError::Internal(e)) => return Err(e.into()),
        };

        if !challenge.nonce.constant_time_eq(&proof.nonce)
            || challenge.is_expired(self.time_source.now())
        {
            return Err(unknown_challenge());
        }

        let message = self.auth_config.message_template.render(&challenge.nonce);

        let verifier = self.resolve_verifier(proof.wallet_type)?;
        match verifier.verify(&message, &proof.signature, &proof.wallet_address) {
            Ok(true) => Ok(challenge),
            Ok(false) => Err(WalletAuthenticationError::InvalidSignature(
                InvalidSignatureError::Mismatch {
                    wallet_address: proof.wallet_address.clone(),
                },
            )),
            Err(e) => Err(WalletAuthenticationError::InvalidSignature(
                InvalidSignatureError::Malformed(e),
            )),
        }
    }

    /// Replaces the verified challenge with a fresh one. Of concurrent
    /// requests carrying the same proof only one gets past this point.
    async fn consume_challenge(
        &self,
        challenge: &Web3AuthChallenge,
    ) -> Result<(), WalletAuthenticationError> {
        let replacement = Web3AuthChallenge::new(
            challenge.wallet_address.clone(),
            self.time_source.now(),
            self.auth_config.nonce_ttl,
        );

        match self
            .nonce_repo
            .rotate_nonce(&challenge.nonce, &replacement)
            .await
        {
            Ok(()) => Ok(()),
            Err(RotateNonceError::NotFound { wallet } | RotateNonceError::Stale { wallet }) => {
                Err(WalletAuthenticationError::UnknownChallenge(
                    UnknownChallengeError {
                        wallet_address: wallet,
                    },
                ))
            }
            Err(RotateNonceError::Internal(e)) => Err(e.into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3WalletAuthenticationService for Web3WalletAuthenticationServiceImpl {
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(wallet_address = %proof.wallet_address, wallet_type = %proof.wallet_type)
    )]
    async fn authenticate(
        &self,
        proof: WalletSignatureProof,
    ) -> Result<WalletAuthenticationResult, WalletAuthenticationError> {
        let challenge = self.check_proof(&proof).await?;

        let provisioned = self
            .provision_wallet_account_use_case
            .execute(&proof.wallet_address, proof.wallet_type)
            .await
            .map_err(|e| match e {
                ProvisionWalletAccountError::SignUpDisabled(e) => {
                    WalletAuthenticationError::SignUpDisabled(e)
                }
                ProvisionWalletAccountError::Internal(e) => WalletAuthenticationError::Internal(e),
            })?;

        self.consume_challenge(&challenge).await?;

        let wallet = self
            .wallet_repo
            .touch_wallet_binding(&provisioned.wallet.id, self.time_source.now())
            .await
            .int_err()?;

        let session = self
            .session_token_service
            .create_session(&provisioned.account.id, &proof.wallet_address)?;

        tracing::info!(
            account_id = %provisioned.account.id,
            is_new_account = provisioned.is_new_account,
            "Wallet signed in"
        );

        Ok(WalletAuthenticationResult {
            account: provisioned.account,
            wallet,
            session,
            is_new_account: provisioned.is_new_account,
        })
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(wallet_address = %proof.wallet_address, wallet_type = %proof.wallet_type)
    )]
    async fn verify_wallet_ownership(
        &self,
        proof: WalletSignatureProof,
    ) -> Result<(), WalletAuthenticationError> {
        let challenge = self.check_proof(&proof).await?;
        self.consume_challenge(&challenge).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
