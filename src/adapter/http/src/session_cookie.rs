// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum_extra::extract::cookie::{Cookie, SameSite};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const SESSION_COOKIE_NAME: &str = "cryptotrade_session";

#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    /// Sets the `Secure` attribute. Disable only for plain HTTP development
    /// setups.
    pub secure: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self { secure: true }
    }
}

impl SessionCookieConfig {
    pub fn session_cookie(&self, access_token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, access_token))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .secure(self.secure)
            .build()
    }

    /// Cookie that makes the browser drop the session
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
