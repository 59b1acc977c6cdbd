// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;

use crate::Web3AuthMessageTemplate;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const DEFAULT_NONCE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone)]
pub struct Web3AuthConfig {
    pub message_template: Web3AuthMessageTemplate,
    /// How long an issued challenge can be answered
    pub nonce_ttl: Duration,
}

impl Default for Web3AuthConfig {
    fn default() -> Self {
        Self {
            message_template: Web3AuthMessageTemplate::default(),
            nonce_ttl: Duration::minutes(DEFAULT_NONCE_TTL_MINUTES),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
