// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Duration;
use cryptotrade_accounts::AccountID;
use cryptotrade_accounts::testing::{dummy_registration_time, test_hex_address};
use cryptotrade_auth_web3::*;
use cryptotrade_auth_web3_services::JwtSessionTokenService;
use pretty_assertions::assert_eq;
use time_source::SystemTimeSourceStub;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_session_roundtrip() {
    let harness = JwtSessionHarness::new(SessionConfig::sample());
    let account_id = AccountID::new_generated();

    let session = harness
        .service
        .create_session(&account_id, &test_hex_address(1))
        .unwrap();

    assert_eq!(
        session.expires_at,
        dummy_registration_time() + Duration::hours(24)
    );

    assert_eq!(
        harness.service.decode_session(&session.access_token).unwrap(),
        SessionSubject {
            account_id,
            wallet_address: test_hex_address(1),
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_session_expiry() {
    let harness = JwtSessionHarness::new(SessionConfig {
        session_ttl: Duration::hours(1),
        ..SessionConfig::sample()
    });

    let session = harness
        .service
        .create_session(&AccountID::new_generated(), &test_hex_address(1))
        .unwrap();

    harness.time_source.advance(Duration::minutes(59));
    assert_matches!(harness.service.decode_session(&session.access_token), Ok(_));

    harness.time_source.advance(Duration::minutes(1));
    assert_matches!(
        harness.service.decode_session(&session.access_token),
        Err(SessionTokenError::Expired)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_tampered_token_is_invalid() {
    let harness = JwtSessionHarness::new(SessionConfig::sample());

    let session = harness
        .service
        .create_session(&AccountID::new_generated(), &test_hex_address(1))
        .unwrap();

    let (unsigned, signature) = session.access_token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{unsigned}.{flipped}{}", &signature[1..]);

    assert_matches!(
        harness.service.decode_session(&tampered),
        Err(SessionTokenError::Invalid(_))
    );
    assert_matches!(
        harness.service.decode_session("not-a-token"),
        Err(SessionTokenError::Invalid(_))
    );
    assert_matches!(
        harness.service.decode_session(""),
        Err(SessionTokenError::Invalid(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_token_of_other_secret_is_invalid() {
    let issuer = JwtSessionHarness::new(SessionConfig::new("some-other-secret"));
    let harness = JwtSessionHarness::new(SessionConfig::sample());

    let session = issuer
        .service
        .create_session(&AccountID::new_generated(), &test_hex_address(1))
        .unwrap();

    assert_matches!(
        harness.service.decode_session(&session.access_token),
        Err(SessionTokenError::Invalid(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_foreign_claims_are_invalid() {
    let harness = JwtSessionHarness::new(SessionConfig::sample());
    let key = jsonwebtoken::EncodingKey::from_secret(SessionConfig::sample().jwt_secret.as_bytes());
    let exp = (dummy_registration_time() + Duration::hours(1)).timestamp();

    let sign = |algorithm, claims: serde_json::Value| {
        jsonwebtoken::encode(&jsonwebtoken::Header::new(algorithm), &claims, &key).unwrap()
    };

    let valid_claims = serde_json::json!({
        "iat": dummy_registration_time().timestamp(),
        "exp": exp,
        "iss": "gg.cryptotrade",
        "sub": AccountID::new_generated().to_string(),
        "wallet": test_hex_address(1).to_string(),
    });

    // Sanity check of the hand-made claims
    assert_matches!(
        harness
            .service
            .decode_session(&sign(jsonwebtoken::Algorithm::HS384, valid_claims.clone())),
        Ok(_)
    );

    let with = |field: &str, value: serde_json::Value| {
        let mut claims = valid_claims.clone();
        claims[field] = value;
        claims
    };

    for token in [
        sign(jsonwebtoken::Algorithm::HS256, valid_claims.clone()),
        sign(
            jsonwebtoken::Algorithm::HS384,
            with("iss", serde_json::json!("com.example")),
        ),
        sign(
            jsonwebtoken::Algorithm::HS384,
            with("sub", serde_json::json!("wasya")),
        ),
        sign(
            jsonwebtoken::Algorithm::HS384,
            with("wallet", serde_json::json!("0x1234")),
        ),
    ] {
        assert_matches!(
            harness.service.decode_session(&token),
            Err(SessionTokenError::Invalid(_))
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct JwtSessionHarness {
    service: JwtSessionTokenService,
    time_source: SystemTimeSourceStub,
}

impl JwtSessionHarness {
    fn new(config: SessionConfig) -> Self {
        let time_source = SystemTimeSourceStub::new_set(dummy_registration_time());

        Self {
            service: JwtSessionTokenService::new(Arc::new(config), Arc::new(time_source.clone())),
            time_source,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
