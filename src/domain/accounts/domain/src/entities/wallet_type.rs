// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::WalletAddressFamily;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Chain family a wallet belongs to. Selects the signature scheme used to
/// prove ownership of an address.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WalletType {
    #[default]
    Ethereum,
    Klaytn,
    Solana,
}

impl WalletType {
    pub fn chain_id(self) -> &'static str {
        match self {
            Self::Ethereum => "1",
            Self::Klaytn => "8217",
            Self::Solana => "1399811149",
        }
    }

    pub fn address_family(self) -> WalletAddressFamily {
        match self {
            Self::Ethereum | Self::Klaytn => WalletAddressFamily::Hex,
            Self::Solana => WalletAddressFamily::Base58,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
