// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// What happens when the last wallet bound to an account is removed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastWalletRemovalPolicy {
    /// Allowed only for accounts that can still sign in without a wallet
    #[default]
    RequireAlternativeCredential,
    Allow,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct WalletAccountsConfig {
    /// When disabled, unknown addresses can neither request a challenge nor
    /// get an account provisioned on sign-in
    pub sign_up_via_wallet: bool,
    pub last_wallet_removal: LastWalletRemovalPolicy,
}

impl Default for WalletAccountsConfig {
    fn default() -> Self {
        Self {
            sign_up_via_wallet: true,
            last_wallet_removal: LastWalletRemovalPolicy::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
