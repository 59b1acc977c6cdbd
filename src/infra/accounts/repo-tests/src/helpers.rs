// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};
use cryptotrade_accounts::testing::{dummy_registration_time, test_hex_address};
use cryptotrade_accounts::{AccountID, WalletBinding, WalletType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn minutes_after_registration(minutes: i64) -> DateTime<Utc> {
    dummy_registration_time() + Duration::minutes(minutes)
}

pub fn make_test_wallet(account_id: AccountID, seed: u32, created_minute: i64) -> WalletBinding {
    WalletBinding::new(
        account_id,
        test_hex_address(seed),
        WalletType::Ethereum,
        minutes_after_registration(created_minute),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
