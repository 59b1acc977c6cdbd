// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::WalletType;
use cryptotrade_auth_web3::{WalletProvider, Web3AuthMessageTemplate, Web3AuthNonce};
use cryptotrade_auth_web3_services::{EvmLocalWalletProvider, SolanaLocalWalletProvider};
use internal_error::{InternalError, ResultIntoInternal};
use serde_json::json;

use crate::{ServerConfig, ServerError, SignMessageArgs};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Development helper: answers a challenge with a local key the way a browser
/// wallet would and prints the resulting `/auth/verify` request body
pub async fn sign_message(args: SignMessageArgs) -> Result<(), ServerError> {
    let config = ServerConfig::load(args.config.as_deref())?;

    let provider: Box<dyn WalletProvider> = match args.wallet_type {
        WalletType::Ethereum | WalletType::Klaytn => Box::new(
            EvmLocalWalletProvider::from_private_key(args.wallet_type, &args.private_key)?,
        ),
        WalletType::Solana => Box::new(SolanaLocalWalletProvider::from_secret_key(
            &args.private_key,
        )?),
    };

    let body = sign_challenge(provider.as_ref(), &config.message_template(), &args.nonce).await?;

    println!("{}", serde_json::to_string_pretty(&body).int_err()?);
    Ok(())
}

pub async fn sign_challenge(
    provider: &dyn WalletProvider,
    template: &Web3AuthMessageTemplate,
    nonce: &Web3AuthNonce,
) -> Result<serde_json::Value, InternalError> {
    let Some(wallet_address) = provider.request_accounts().await.int_err()?.into_iter().next()
    else {
        return InternalError::bail("Wallet exposes no accounts");
    };

    let message = template.render(nonce);
    let signature = provider
        .sign_message(&wallet_address, &message)
        .await
        .int_err()?;

    tracing::debug!(%wallet_address, wallet_type = %provider.wallet_type(), "Challenge signed");

    Ok(json!({
        "address": wallet_address,
        "type": provider.wallet_type(),
        "message": message,
        "signature": signature,
    }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
