// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_CRYPTOTRADE_JWT_SECRET: &str = "CRYPTOTRADE_JWT_SECRET";

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub session_ttl: Duration,
}

impl SessionConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }

    pub fn sample() -> Self {
        Self::new("sample-jwt-secret-used-in-tests-only")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
