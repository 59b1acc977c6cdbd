// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{AccountID, WalletAddress, WalletType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletID(Uuid);

impl WalletID {
    pub fn new_generated() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for WalletID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for WalletID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for WalletID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Association of a wallet address with an account.
///
/// An address is bound to at most one account, and every account with at
/// least one binding has exactly one primary binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletBinding {
    pub id: WalletID,
    pub account_id: AccountID,
    pub address: WalletAddress,
    pub wallet_type: WalletType,
    pub is_primary: bool,
    pub nickname: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl WalletBinding {
    pub fn new(
        account_id: AccountID,
        address: WalletAddress,
        wallet_type: WalletType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: WalletID::new_generated(),
            account_id,
            address,
            wallet_type,
            is_primary: false,
            nickname: None,
            created_at: now,
            last_used_at: now,
        }
    }

    pub fn chain_id(&self) -> &'static str {
        self.wallet_type.chain_id()
    }

    /// Trims the nickname. Blank input clears it.
    pub fn normalize_nickname(
        nickname: Option<&str>,
    ) -> Result<Option<String>, InvalidWalletNicknameError> {
        let Some(nickname) = nickname.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        if nickname.chars().count() > WALLET_NICKNAME_MAX_LENGTH {
            return Err(InvalidWalletNicknameError {
                reason: format!("longer than {WALLET_NICKNAME_MAX_LENGTH} characters"),
            });
        }
        if nickname.chars().any(char::is_control) {
            return Err(InvalidWalletNicknameError {
                reason: "contains control characters".to_string(),
            });
        }

        Ok(Some(nickname.to_string()))
    }
}

pub const WALLET_NICKNAME_MAX_LENGTH: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid wallet nickname: {reason}")]
pub struct InvalidWalletNicknameError {
    pub reason: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
