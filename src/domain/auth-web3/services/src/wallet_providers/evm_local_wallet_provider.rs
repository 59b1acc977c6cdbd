// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use cryptotrade_accounts::{WalletAddress, WalletType};
use cryptotrade_auth_web3::{WalletProvider, WalletProviderError};
use internal_error::{InternalError, ResultIntoInternal};

use crate::{evm_personal_message_hash, evm_signed_message_prefix};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Signs `personal_sign` requests the way MetaMask (Ethereum) or Kaikas
/// (Klaytn) would
pub struct EvmLocalWalletProvider {
    wallet_type: WalletType,
    prefix: &'static str,
    signers: Vec<(WalletAddress, PrivateKeySigner)>,
}

impl EvmLocalWalletProvider {
    pub fn new(
        wallet_type: WalletType,
        signers: impl IntoIterator<Item = PrivateKeySigner>,
    ) -> Result<Self, InternalError> {
        let Some(prefix) = evm_signed_message_prefix(wallet_type) else {
            return InternalError::bail(format!("{wallet_type} is not an EVM wallet type"));
        };

        let signers = signers
            .into_iter()
            .map(|signer| {
                let address = WalletAddress::parse(&signer.address().to_string()).int_err()?;
                Ok((address, signer))
            })
            .collect::<Result<_, InternalError>>()?;

        Ok(Self {
            wallet_type,
            prefix,
            signers,
        })
    }

    /// Provider with a single freshly generated key
    pub fn random(wallet_type: WalletType) -> Result<Self, InternalError> {
        Self::new(wallet_type, [PrivateKeySigner::random()])
    }

    /// Provider for a hex-encoded secp256k1 private key
    pub fn from_private_key(
        wallet_type: WalletType,
        private_key: &str,
    ) -> Result<Self, InternalError> {
        let signer: PrivateKeySigner = private_key.trim().parse().int_err()?;
        Self::new(wallet_type, [signer])
    }
}

#[async_trait::async_trait]
impl WalletProvider for EvmLocalWalletProvider {
    fn wallet_type(&self) -> WalletType {
        self.wallet_type
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletProviderError> {
        Ok(self
            .signers
            .iter()
            .map(|(address, _)| address.clone())
            .collect())
    }

    async fn sign_message(
        &self,
        wallet_address: &WalletAddress,
        message: &str,
    ) -> Result<String, WalletProviderError> {
        let Some((_, signer)) = self
            .signers
            .iter()
            .find(|(address, _)| address == wallet_address)
        else {
            return Err(WalletProviderError::UnknownAccount {
                wallet_address: wallet_address.clone(),
            });
        };

        let signature = signer
            .sign_hash_sync(&evm_personal_message_hash(self.prefix, message))
            .int_err()?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
