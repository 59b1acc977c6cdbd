// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::LazyLock;

use rand::RngCore;
use regex::Regex;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const NONCE_ENTROPY_BYTES: usize = 16;

static WEB3_AUTH_NONCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^0x[0-9a-f]{32}$").unwrap());

/// Single-use challenge value: `0x` followed by 16 random bytes in hex
#[nutype::nutype(
    sanitize(trim),
    validate(regex = WEB3_AUTH_NONCE_REGEX),
    derive(AsRef, Clone, Debug, Display, Eq, PartialEq, TryFrom)
)]
pub struct Web3AuthNonce(String);

impl Web3AuthNonce {
    pub fn new() -> Self {
        let mut bytes = [0u8; NONCE_ENTROPY_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);

        Self::try_new(format!("0x{}", hex::encode(bytes))).expect("Invalid nonce generated")
    }

    /// Comparison that does not short-circuit on the first differing byte
    pub fn constant_time_eq(&self, other: &Self) -> bool {
        let a = self.as_ref().as_bytes();
        let b = other.as_ref().as_bytes();

        if a.len() != b.len() {
            return false;
        }

        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
