// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Wallets holding private keys in process memory. They stand in for the
//! browser wallet extensions in tests and in the `sign-message` command.

mod evm_local_wallet_provider;
mod solana_local_wallet_provider;

pub use evm_local_wallet_provider::*;
pub use solana_local_wallet_provider::*;
