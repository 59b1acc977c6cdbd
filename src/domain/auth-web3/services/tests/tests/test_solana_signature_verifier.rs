// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use cryptotrade_accounts::testing::test_hex_address;
use cryptotrade_accounts::WalletAddress;
use cryptotrade_auth_web3::*;
use cryptotrade_auth_web3_services::{SolanaLocalWalletProvider, SolanaSignatureVerifier};
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn signed_in_message() -> String {
    Web3AuthMessageTemplate::default().render(&Web3AuthNonce::new())
}

async fn sign(provider: &SolanaLocalWalletProvider, message: &str) -> (WalletAddress, String) {
    let address = provider.request_accounts().await.unwrap().remove(0);
    let signature = provider.sign_message(&address, message).await.unwrap();
    (address, signature)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_valid_signature() {
    let phantom = SolanaLocalWalletProvider::random().unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&phantom, &message).await;

    assert_eq!(
        SolanaSignatureVerifier.verify(&message, &signature, &address),
        Ok(true)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_provider_from_secret_key() {
    let secret_key = bs58::encode([7u8; 32]).into_string();
    let first = SolanaLocalWalletProvider::from_secret_key(&secret_key).unwrap();
    let second = SolanaLocalWalletProvider::from_secret_key(&secret_key).unwrap();

    // Same key, same address
    assert_eq!(
        first.request_accounts().await.unwrap(),
        second.request_accounts().await.unwrap()
    );

    assert!(SolanaLocalWalletProvider::from_secret_key("1111").is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_other_signer() {
    let signer = SolanaLocalWalletProvider::random().unwrap();
    let victim = SolanaLocalWalletProvider::random().unwrap();

    let message = signed_in_message();
    let (_, signature) = sign(&signer, &message).await;
    let victim_address = victim.request_accounts().await.unwrap().remove(0);

    assert_eq!(
        SolanaSignatureVerifier.verify(&message, &signature, &victim_address),
        Ok(false)
    );
    assert_eq!(
        SolanaSignatureVerifier.verify(&message, &signature, &test_hex_address(1)),
        Ok(false)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mutated_message_is_rejected() {
    let phantom = SolanaLocalWalletProvider::random().unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&phantom, &message).await;

    for mutated in [
        message.replace("Welcome", "welcome"),
        message.replace("\n\nNonce", "\nNonce"),
        format!(" {message}"),
        message[..message.len() - 1].to_string(),
    ] {
        assert_eq!(
            SolanaSignatureVerifier.verify(&mutated, &signature, &address),
            Ok(false)
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mutated_signature_is_never_accepted() {
    let phantom = SolanaLocalWalletProvider::random().unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&phantom, &message).await;

    for index in 0..signature.len() {
        let mutated: String = signature
            .char_indices()
            .map(|(i, c)| match (i == index, c) {
                (false, c) => c,
                (true, '2') => '3',
                (true, _) => '2',
            })
            .collect();

        assert_ne!(
            SolanaSignatureVerifier.verify(&message, &mutated, &address),
            Ok(true),
            "Mutation at {index} was accepted"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_malformed_signatures() {
    let phantom = SolanaLocalWalletProvider::random().unwrap();
    let address = phantom.request_accounts().await.unwrap().remove(0);
    let message = signed_in_message();

    let too_short = bs58::encode([1u8; 32]).into_string();
    for signature in ["", "0OIl", "0x1234", too_short.as_str()] {
        assert_matches!(
            SolanaSignatureVerifier.verify(&message, signature, &address),
            Err(MalformedSignatureError { .. }),
            "Signature {signature:?} was not reported as malformed"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
