// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use cryptotrade_accounts::WalletType;
use cryptotrade_auth_web3::Web3AuthNonce;

pub(crate) fn value_parse_wallet_type(s: &str) -> Result<WalletType, String> {
    match WalletType::from_str(s) {
        Ok(v) => Ok(v),
        Err(_) => Err("Wallet type should be one of: `ethereum`, `klaytn`, `solana`".to_string()),
    }
}

pub(crate) fn value_parse_nonce(s: &str) -> Result<Web3AuthNonce, String> {
    match Web3AuthNonce::try_new(s) {
        Ok(v) => Ok(v),
        Err(_) => Err(
            "Nonce should be `0x` followed by 32 lowercase hex digits, as issued by \
             `/auth/challenge`"
                .to_string(),
        ),
    }
}
