// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, TimeZone, Utc};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn dummy_registration_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
}

/// Deterministic hex address, distinct for every `seed`
pub fn test_hex_address(seed: u32) -> WalletAddress {
    WalletAddress::parse(&format!("0x{seed:040x}")).unwrap()
}

impl Account {
    /// Wallet-only account
    pub fn test(username: &str) -> Self {
        let now = dummy_registration_time();
        Self {
            id: AccountID::new_generated(),
            username: AccountUsername::try_new(username).unwrap(),
            display_name: username.to_string(),
            avatar_url: None,
            email: None,
            auth_method: AccountAuthMethod::Wallet,
            created_at: now,
            updated_at: now,
        }
    }

    /// Account that can also sign in with email and password
    pub fn test_with_email(username: &str) -> Self {
        Self {
            email: Some(format!("{username}@example.com")),
            auth_method: AccountAuthMethod::EmailPassword,
            ..Self::test(username)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
