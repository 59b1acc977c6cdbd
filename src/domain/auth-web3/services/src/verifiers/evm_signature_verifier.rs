// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{B256, Signature, keccak256};
use cryptotrade_accounts::{WalletAddress, WalletAddressFamily, WalletType};
use cryptotrade_auth_web3::{MalformedSignatureError, Web3SignatureVerifier};
use dill::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const EVM_SIGNATURE_LEN: usize = 65;

const ETHEREUM_SIGNED_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";
const KLAYTN_SIGNED_MESSAGE_PREFIX: &str = "\x19Klaytn Signed Message:\n";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Personal-message prefix of the EVM-compatible chains, `None` for others
pub fn evm_signed_message_prefix(wallet_type: WalletType) -> Option<&'static str> {
    match wallet_type {
        WalletType::Ethereum => Some(ETHEREUM_SIGNED_MESSAGE_PREFIX),
        WalletType::Klaytn => Some(KLAYTN_SIGNED_MESSAGE_PREFIX),
        WalletType::Solana => None,
    }
}

/// `keccak256(prefix || len(message) || message)`, the digest a wallet signs
/// for a `personal_sign` request
pub fn evm_personal_message_hash(prefix: &str, message: &str) -> B256 {
    let mut data = Vec::with_capacity(prefix.len() + 20 + message.len());
    data.extend_from_slice(prefix.as_bytes());
    data.extend_from_slice(message.len().to_string().as_bytes());
    data.extend_from_slice(message.as_bytes());

    keccak256(&data)
}

fn parse_evm_signature(signature: &str) -> Result<Signature, MalformedSignatureError> {
    let signature = signature.trim();
    let signature_hex = signature
        .strip_prefix("0x")
        .or_else(|| signature.strip_prefix("0X"))
        .unwrap_or(signature);

    let bytes = hex::decode(signature_hex)
        .map_err(|_| MalformedSignatureError::new("signature is not hex-encoded"))?;

    if bytes.len() != EVM_SIGNATURE_LEN {
        return Err(MalformedSignatureError::new(format!(
            "expected {EVM_SIGNATURE_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    Signature::from_raw(&bytes).map_err(|e| MalformedSignatureError::new(e.to_string()))
}

fn verify_evm_personal_signature(
    prefix: &str,
    message: &str,
    signature: &str,
    claimed_address: &WalletAddress,
) -> Result<bool, MalformedSignatureError> {
    let signature = parse_evm_signature(signature)?;

    let recovered = signature
        .recover_address_from_prehash(&evm_personal_message_hash(prefix, message))
        .map_err(|e| MalformedSignatureError::new(e.to_string()))?;

    if claimed_address.family() != WalletAddressFamily::Hex {
        return Ok(false);
    }

    Ok(hex::encode(recovered.as_slice()) == claimed_address.body())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// EIP-191 personal message signatures over secp256k1
#[component]
#[interface(dyn Web3SignatureVerifier)]
#[scope(Singleton)]
pub struct EthereumSignatureVerifier;

impl Web3SignatureVerifier for EthereumSignatureVerifier {
    fn wallet_type(&self) -> WalletType {
        WalletType::Ethereum
    }

    fn verify(
        &self,
        message: &str,
        signature: &str,
        claimed_address: &WalletAddress,
    ) -> Result<bool, MalformedSignatureError> {
        verify_evm_personal_signature(
            ETHEREUM_SIGNED_MESSAGE_PREFIX,
            message,
            signature,
            claimed_address,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Same scheme as Ethereum with the Klaytn message prefix (Kaikas wallet)
#[component]
#[interface(dyn Web3SignatureVerifier)]
#[scope(Singleton)]
pub struct KlaytnSignatureVerifier;

impl Web3SignatureVerifier for KlaytnSignatureVerifier {
    fn wallet_type(&self) -> WalletType {
        WalletType::Klaytn
    }

    fn verify(
        &self,
        message: &str,
        signature: &str,
        claimed_address: &WalletAddress,
    ) -> Result<bool, MalformedSignatureError> {
        verify_evm_personal_signature(
            KLAYTN_SIGNED_MESSAGE_PREFIX,
            message,
            signature,
            claimed_address,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
