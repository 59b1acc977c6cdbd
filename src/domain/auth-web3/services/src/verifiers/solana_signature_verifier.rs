// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::{WalletAddress, WalletAddressFamily, WalletType};
use cryptotrade_auth_web3::{MalformedSignatureError, Web3SignatureVerifier};
use dill::*;
use ed25519_dalek::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, Signature, VerifyingKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Not every 32-byte string is a valid curve point
fn decode_public_key(address: &WalletAddress) -> Option<VerifyingKey> {
    let bytes: [u8; PUBLIC_KEY_LENGTH] = bs58::decode(address.as_str())
        .into_vec()
        .ok()?
        .try_into()
        .ok()?;

    VerifyingKey::from_bytes(&bytes).ok()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Ed25519 signature over the raw UTF-8 message, both the signature and the
/// public key (the address) encoded in base58
#[component]
#[interface(dyn Web3SignatureVerifier)]
#[scope(Singleton)]
pub struct SolanaSignatureVerifier;

impl Web3SignatureVerifier for SolanaSignatureVerifier {
    fn wallet_type(&self) -> WalletType {
        WalletType::Solana
    }

    fn verify(
        &self,
        message: &str,
        signature: &str,
        claimed_address: &WalletAddress,
    ) -> Result<bool, MalformedSignatureError> {
        let signature_bytes: [u8; SIGNATURE_LENGTH] = bs58::decode(signature.trim())
            .into_vec()
            .map_err(|e| MalformedSignatureError::new(e.to_string()))?
            .try_into()
            .map_err(|bytes: Vec<u8>| {
                MalformedSignatureError::new(format!(
                    "expected {} bytes, got {}",
                    SIGNATURE_LENGTH,
                    bytes.len()
                ))
            })?;
        let signature = Signature::from_bytes(&signature_bytes);

        if claimed_address.family() != WalletAddressFamily::Base58 {
            return Ok(false);
        }

        let Some(public_key) = decode_public_key(claimed_address) else {
            return Ok(false);
        };

        Ok(public_key
            .verify_strict(message.as_bytes(), &signature)
            .is_ok())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
