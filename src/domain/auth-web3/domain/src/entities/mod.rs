// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod session_config;
mod web3_auth_challenge;
mod web3_auth_config;
mod web3_auth_message;
mod web3_auth_nonce;

pub use session_config::*;
pub use web3_auth_challenge::*;
pub use web3_auth_config::*;
pub use web3_auth_message::*;
pub use web3_auth_nonce::*;
