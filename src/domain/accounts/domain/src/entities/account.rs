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
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::WalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type AccountDisplayName = String;

const DEFAULT_AVATAR_URL_PREFIX: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

const DEFAULT_USERNAME_PREFIX: &str = "user_";
const DEFAULT_USERNAME_MIN_SUFFIX_LEN: usize = 6;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountID(Uuid);

impl AccountID {
    pub fn new_generated() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccountID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

static ACCOUNT_USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9_]{3,64}$").unwrap());

#[nutype::nutype(
    sanitize(trim, lowercase),
    validate(regex = ACCOUNT_USERNAME_REGEX),
    derive(
        AsRef,
        Clone,
        Debug,
        Display,
        Eq,
        PartialEq,
        Hash,
        TryFrom,
        Serialize,
        Deserialize
    )
)]
pub struct AccountUsername(String);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// How the account was originally registered. Accounts registered by an
/// email/password flow keep a credential that is independent of any wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AccountAuthMethod {
    Wallet,
    EmailPassword,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountID,
    pub username: AccountUsername,
    pub display_name: AccountDisplayName,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub auth_method: AccountAuthMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Account provisioned on the first successful wallet sign-in
    pub fn new_for_wallet(
        id: AccountID,
        username: AccountUsername,
        address: &WalletAddress,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            display_name: address.abbreviated(),
            avatar_url: Some(default_avatar_url(address)),
            email: None,
            auth_method: AccountAuthMethod::Wallet,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_alternative_credential(&self) -> bool {
        self.auth_method == AccountAuthMethod::EmailPassword
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn default_avatar_url(address: &WalletAddress) -> String {
    format!("{DEFAULT_AVATAR_URL_PREFIX}{address}")
}

/// Usernames to try, in order, for an account provisioned from `address`:
/// `user_` plus the first 6 characters of the address body, then 8, 10 and
/// so on until the whole body is used.
pub fn default_username_candidates(
    address: &WalletAddress,
) -> impl Iterator<Item = AccountUsername> + '_ {
    let body = address.body();

    (DEFAULT_USERNAME_MIN_SUFFIX_LEN..body.len())
        .step_by(2)
        .chain(std::iter::once(body.len()))
        .filter_map(move |len| {
            AccountUsername::try_new(format!("{DEFAULT_USERNAME_PREFIX}{}", &body[..len])).ok()
        })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
