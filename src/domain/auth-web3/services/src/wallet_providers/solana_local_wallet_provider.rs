// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::{WalletAddress, WalletType};
use cryptotrade_auth_web3::{WalletProvider, WalletProviderError};
use ed25519_dalek::{SECRET_KEY_LENGTH, Signer, SigningKey};
use internal_error::{InternalError, ResultIntoInternal};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Signs raw UTF-8 messages the way Phantom's `signMessage` does
pub struct SolanaLocalWalletProvider {
    keys: Vec<(WalletAddress, SigningKey)>,
}

impl SolanaLocalWalletProvider {
    pub fn new(keys: impl IntoIterator<Item = SigningKey>) -> Result<Self, InternalError> {
        let keys = keys
            .into_iter()
            .map(|key| {
                let address = bs58::encode(key.verifying_key().as_bytes()).into_string();
                Ok((WalletAddress::parse(&address).int_err()?, key))
            })
            .collect::<Result<_, InternalError>>()?;

        Ok(Self { keys })
    }

    pub fn random() -> Result<Self, InternalError> {
        Self::new([SigningKey::generate(&mut rand::rngs::OsRng)])
    }

    /// Provider for a base58-encoded 32-byte Ed25519 secret key
    pub fn from_secret_key(secret_key: &str) -> Result<Self, InternalError> {
        let bytes = bs58::decode(secret_key.trim()).into_vec().int_err()?;

        let Ok(secret) = <[u8; SECRET_KEY_LENGTH]>::try_from(bytes.as_slice()) else {
            return InternalError::bail(format!(
                "Secret key must be {SECRET_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ));
        };

        Self::new([SigningKey::from_bytes(&secret)])
    }
}

#[async_trait::async_trait]
impl WalletProvider for SolanaLocalWalletProvider {
    fn wallet_type(&self) -> WalletType {
        WalletType::Solana
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletProviderError> {
        Ok(self.keys.iter().map(|(address, _)| address.clone()).collect())
    }

    async fn sign_message(
        &self,
        wallet_address: &WalletAddress,
        message: &str,
    ) -> Result<String, WalletProviderError> {
        let Some((_, key)) = self.keys.iter().find(|(address, _)| address == wallet_address)
        else {
            return Err(WalletProviderError::UnknownAccount {
                wallet_address: wallet_address.clone(),
            });
        };

        let signature = key.sign(message.as_bytes());

        Ok(bs58::encode(signature.to_bytes()).into_string())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
