// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod account;
mod wallet_accounts_config;
mod wallet_address;
mod wallet_binding;
mod wallet_type;

pub use account::*;
pub use wallet_accounts_config::*;
pub use wallet_address::*;
pub use wallet_binding::*;
pub use wallet_type::*;
