// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::Duration;
use cryptotrade_accounts::{AccountID, WalletAddress};
use cryptotrade_auth_web3::*;
use internal_error::{ErrorIntoInternal, InternalError};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const CRYPTOTRADE_JWT_ISSUER: &str = "gg.cryptotrade";
const CRYPTOTRADE_JWT_ALGORITHM: Algorithm = Algorithm::HS384;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct JwtSessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
    time_source: Arc<dyn SystemTimeSource>,
}

#[dill::component(pub)]
#[dill::interface(dyn SessionTokenService)]
impl JwtSessionTokenService {
    pub fn new(config: Arc<SessionConfig>, time_source: Arc<dyn SystemTimeSource>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            session_ttl: config.session_ttl,
            time_source,
        }
    }
}

impl SessionTokenService for JwtSessionTokenService {
    fn create_session(
        &self,
        account_id: &AccountID,
        wallet_address: &WalletAddress,
    ) -> Result<SessionToken, InternalError> {
        let issued_at = self.time_source.now();
        let expires_at = issued_at + self.session_ttl;

        let claims = SessionClaims {
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: String::from(CRYPTOTRADE_JWT_ISSUER),
            sub: account_id.to_string(),
            wallet: wallet_address.to_string(),
        };

        let access_token = encode(
            &Header::new(CRYPTOTRADE_JWT_ALGORITHM),
            &claims,
            &self.encoding_key,
        )
        .map_err(ErrorIntoInternal::int_err)?;

        Ok(SessionToken {
            access_token,
            expires_at,
        })
    }

    fn decode_session(&self, access_token: &str) -> Result<SessionSubject, SessionTokenError> {
        let mut validation = Validation::new(CRYPTOTRADE_JWT_ALGORITHM);
        validation.set_issuer(&[CRYPTOTRADE_JWT_ISSUER]);
        // Expiry is checked below against the injected clock
        validation.validate_exp = false;

        let claims = decode::<SessionClaims>(access_token, &self.decoding_key, &validation)
            .map_err(|e| match *e.kind() {
                ErrorKind::ExpiredSignature => SessionTokenError::Expired,
                _ => SessionTokenError::Invalid(Box::new(e)),
            })?
            .claims;

        if claims.exp <= self.time_source.now().timestamp() {
            return Err(SessionTokenError::Expired);
        }

        Ok(SessionSubject {
            account_id: claims
                .sub
                .parse()
                .map_err(|e| SessionTokenError::Invalid(Box::new(e)))?,
            wallet_address: WalletAddress::parse(&claims.wallet)
                .map_err(|e| SessionTokenError::Invalid(Box::new(e)))?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    iat: i64,
    exp: i64,
    iss: String,
    sub: String,
    /// Wallet used to sign in
    wallet: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
