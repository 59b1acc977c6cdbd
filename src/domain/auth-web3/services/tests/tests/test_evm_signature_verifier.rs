// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use cryptotrade_accounts::{WalletAddress, WalletType};
use cryptotrade_auth_web3::*;
use cryptotrade_auth_web3_services::{
    EthereumSignatureVerifier,
    EvmLocalWalletProvider,
    KlaytnSignatureVerifier,
};
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const NONCE: &str = "0x0123456789abcdef0123456789abcdef";

fn signed_in_message() -> String {
    Web3AuthMessageTemplate::default().render(&Web3AuthNonce::try_new(NONCE).unwrap())
}

async fn sign(provider: &EvmLocalWalletProvider, message: &str) -> (WalletAddress, String) {
    let address = provider.request_accounts().await.unwrap().remove(0);
    let signature = provider.sign_message(&address, message).await.unwrap();
    (address, signature)
}

fn mutate_char(s: &str, index: usize, replacement: impl Fn(char) -> char) -> String {
    s.char_indices()
        .map(|(i, c)| if i == index { replacement(c) } else { c })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_valid_ethereum_signature() {
    let provider = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&provider, &message).await;

    let verifier = EthereumSignatureVerifier;
    assert_eq!(verifier.verify(&message, &signature, &address), Ok(true));

    // Without the `0x` prefix
    assert_eq!(
        verifier.verify(&message, signature.trim_start_matches("0x"), &address),
        Ok(true)
    );

    // Checksummed and lowercase spellings are the same wallet
    let uppercased = WalletAddress::parse(&address.as_str().to_uppercase()).unwrap();
    assert_eq!(verifier.verify(&message, &signature, &uppercased), Ok(true));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_recovery_id_without_offset() {
    let provider = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&provider, &message).await;

    // Some wallets produce `v` as 0/1 instead of 27/28
    let mut bytes = hex::decode(signature.trim_start_matches("0x")).unwrap();
    bytes[64] -= 27;
    let signature = hex::encode(bytes);

    assert_eq!(
        EthereumSignatureVerifier.verify(&message, &signature, &address),
        Ok(true)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_other_signer() {
    let signer = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let victim = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();

    let message = signed_in_message();
    let (_, signature) = sign(&signer, &message).await;
    let victim_address = victim.request_accounts().await.unwrap().remove(0);

    assert_eq!(
        EthereumSignatureVerifier.verify(&message, &signature, &victim_address),
        Ok(false)
    );

    let solana_address =
        WalletAddress::parse("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap();
    assert_eq!(
        EthereumSignatureVerifier.verify(&message, &signature, &solana_address),
        Ok(false)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_klaytn_prefix_is_not_interchangeable() {
    let kaikas = EvmLocalWalletProvider::random(WalletType::Klaytn).unwrap();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let message = signed_in_message();

    let (klaytn_address, klaytn_signature) = sign(&kaikas, &message).await;
    let (ethereum_address, ethereum_signature) = sign(&metamask, &message).await;

    assert_eq!(
        KlaytnSignatureVerifier.verify(&message, &klaytn_signature, &klaytn_address),
        Ok(true)
    );
    assert_eq!(
        EthereumSignatureVerifier.verify(&message, &klaytn_signature, &klaytn_address),
        Ok(false)
    );
    assert_eq!(
        KlaytnSignatureVerifier.verify(&message, &ethereum_signature, &ethereum_address),
        Ok(false)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mutated_message_is_rejected() {
    let provider = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&provider, &message).await;

    for (index, _) in message.char_indices() {
        let mutated = mutate_char(&message, index, |c| if c == 'x' { 'y' } else { 'x' });
        assert_eq!(
            EthereumSignatureVerifier.verify(&mutated, &signature, &address),
            Ok(false),
            "Mutation at {index} was accepted"
        );
    }

    // Whitespace and casing are part of the signed text
    for mutated in [
        message.replace("\n\n", "\n"),
        format!("{message}\n"),
        message.replace("Nonce", "nonce"),
    ] {
        assert_eq!(
            EthereumSignatureVerifier.verify(&mutated, &signature, &address),
            Ok(false)
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mutated_signature_is_never_accepted() {
    let provider = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let message = signed_in_message();
    let (address, signature) = sign(&provider, &message).await;

    // Every hex digit after the `0x` prefix
    for index in 2..signature.len() {
        let mutated = mutate_char(&signature, index, |c| if c == '0' { '1' } else { '0' });
        assert_ne!(
            EthereumSignatureVerifier.verify(&message, &mutated, &address),
            Ok(true),
            "Mutation at {index} was accepted"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_malformed_signatures() {
    let provider = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let address = provider.request_accounts().await.unwrap().remove(0);
    let message = signed_in_message();

    for signature in ["", "0x", "0x1234", "not-a-signature", &format!("0x{}", "ab".repeat(66))] {
        assert_matches!(
            EthereumSignatureVerifier.verify(&message, signature, &address),
            Err(MalformedSignatureError { .. }),
            "Signature {signature:?} was not reported as malformed"
        );
    }

    // Valid length, impossible recovery id
    let mut bytes = vec![0x11; 65];
    bytes[64] = 5;
    assert_matches!(
        EthereumSignatureVerifier.verify(&message, &hex::encode(bytes), &address),
        Err(_)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
