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

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const HEX_ADDRESS_BODY_LEN: usize = 40;
const BASE58_PUBLIC_KEY_LEN: usize = 32;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletAddressFamily {
    /// `0x` followed by 40 hex digits (Ethereum, Klaytn)
    Hex,
    /// Base58 encoding of a 32-byte Ed25519 public key (Solana)
    Base58,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Wallet address in canonical form.
///
/// Hex addresses are lowercased so that checksummed and non-checksummed
/// spellings of the same address compare equal. Base58 addresses are
/// case-sensitive and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> Result<Self, InvalidWalletAddressError> {
        let raw = raw.trim();

        if let Some(body) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            if body.len() != HEX_ADDRESS_BODY_LEN || hex::decode(body).is_err() {
                return Err(InvalidWalletAddressError::new(raw));
            }
            return Ok(Self(format!("0x{}", body.to_ascii_lowercase())));
        }

        match bs58::decode(raw).into_vec() {
            Ok(bytes) if bytes.len() == BASE58_PUBLIC_KEY_LEN => Ok(Self(raw.to_string())),
            _ => Err(InvalidWalletAddressError::new(raw)),
        }
    }

    pub fn family(&self) -> WalletAddressFamily {
        if self.0.starts_with("0x") {
            WalletAddressFamily::Hex
        } else {
            WalletAddressFamily::Base58
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address without the `0x` prefix
    pub fn body(&self) -> &str {
        self.0.strip_prefix("0x").unwrap_or(&self.0)
    }

    /// `0xabcd...1234` form used as a default display name
    pub fn abbreviated(&self) -> String {
        let prefix_len = match self.family() {
            WalletAddressFamily::Hex => 6,
            WalletAddressFamily::Base58 => 4,
        };
        format!(
            "{}...{}",
            &self.0[..prefix_len],
            &self.0[self.0.len() - 4..]
        )
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = InvalidWalletAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid wallet address: '{address}'")]
pub struct InvalidWalletAddressError {
    pub address: String,
}

impl InvalidWalletAddressError {
    fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
