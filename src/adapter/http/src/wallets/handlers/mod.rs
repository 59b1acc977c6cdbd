// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod add_wallet_handler;
mod get_primary_wallet_handler;
mod list_wallets_handler;
mod remove_wallet_handler;
mod rename_wallet_handler;
mod set_primary_wallet_handler;

pub use add_wallet_handler::*;
pub use get_primary_wallet_handler::*;
pub use list_wallets_handler::*;
pub use remove_wallet_handler::*;
pub use rename_wallet_handler::*;
pub use set_primary_wallet_handler::*;
