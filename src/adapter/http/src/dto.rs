// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cryptotrade_accounts::{
    Account,
    AccountAuthMethod,
    AccountID,
    WalletAddress,
    WalletAddressFamily,
    WalletBinding,
    WalletID,
    WalletType,
};
use cryptotrade_auth_web3::{WalletSignatureProof, Web3AuthMessageTemplate, Web3AuthNonce};
use http_common::ApiError;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[schema(value_type = String)]
    pub id: AccountID,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = String)]
    pub auth_method: AccountAuthMethod,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username.to_string(),
            display_name: account.display_name,
            avatar_url: account.avatar_url,
            email: account.email,
            auth_method: account.auth_method,
            created_at: account.created_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    #[schema(value_type = String)]
    pub id: WalletID,
    #[schema(value_type = String)]
    pub address: WalletAddress,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub wallet_type: WalletType,
    pub chain_id: String,
    pub is_primary: bool,
    pub nickname: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub last_used_at: DateTime<Utc>,
}

impl From<WalletBinding> for WalletResponse {
    fn from(wallet: WalletBinding) -> Self {
        Self {
            id: wallet.id,
            chain_id: wallet.chain_id().to_string(),
            address: wallet.address,
            wallet_type: wallet.wallet_type,
            is_primary: wallet.is_primary,
            nickname: wallet.nickname,
            created_at: wallet.created_at,
            last_used_at: wallet.last_used_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Signed challenge as submitted by a browser wallet.
///
/// The nonce can be given directly, recovered from the signed message, or
/// both (then they must agree).
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletProofRequest {
    pub address: String,
    pub signature: String,
    /// Exact message that was signed
    pub message: Option<String>,
    pub nonce: Option<String>,
    /// `ethereum`, `klaytn` or `solana`. Defaults to `ethereum` for hex
    /// addresses and `solana` for base58 ones.
    #[serde(rename = "type")]
    pub wallet_type: Option<String>,
}

impl WalletProofRequest {
    pub fn into_proof(
        self,
        template: &Web3AuthMessageTemplate,
    ) -> Result<WalletSignatureProof, ApiError> {
        let wallet_address = WalletAddress::parse(&self.address).map_err(ApiError::bad_request)?;

        let wallet_type = match self.wallet_type {
            Some(raw) => WalletType::from_str(&raw)
                .map_err(|_| ApiError::bad_request_with_message("Unknown wallet type"))?,
            None => match wallet_address.family() {
                WalletAddressFamily::Hex => WalletType::Ethereum,
                WalletAddressFamily::Base58 => WalletType::Solana,
            },
        };

        let nonce_from_field = self
            .nonce
            .map(Web3AuthNonce::try_new)
            .transpose()
            .map_err(|_| ApiError::bad_request_with_message("Invalid nonce"))?;

        let nonce_from_message = self
            .message
            .map(|message| template.extract_nonce(&message))
            .transpose()
            .map_err(ApiError::bad_request)?;

        let nonce = match (nonce_from_field, nonce_from_message) {
            (Some(a), Some(b)) if a != b => {
                return Err(ApiError::bad_request_with_message(
                    "Nonce does not match the signed message",
                ));
            }
            (Some(nonce), _) | (None, Some(nonce)) => nonce,
            (None, None) => {
                return Err(ApiError::bad_request_with_message(
                    "Either message or nonce is required",
                ));
            }
        };

        Ok(WalletSignatureProof {
            wallet_address,
            wallet_type,
            nonce,
            signature: self.signature,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
