// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::testing::dummy_registration_time;
use cryptotrade_accounts::{WalletAccountsConfig, WalletAddress};
use cryptotrade_accounts_inmem::InMemoryAccountRepository;
use cryptotrade_adapter_http::SessionCookieConfig;
use cryptotrade_auth_web3::{SessionConfig, WalletProvider, Web3AuthConfig};
use cryptotrade_auth_web3_inmem::InMemoryWeb3AuthNonceRepository;
use internal_error::{InternalError, ResultIntoInternal};
use serde_json::{Value, json};
use time_source::{SystemTimeSource, SystemTimeSourceStub};

use super::TestAPIServer;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Real services over in-memory storage, served on an ephemeral port
pub struct HttpHarness {
    api_server: TestAPIServer,
    pub catalog: dill::Catalog,
    pub time_source: SystemTimeSourceStub,
}

impl HttpHarness {
    pub async fn new() -> Self {
        Self::with_accounts_config(WalletAccountsConfig::default()).await
    }

    pub async fn with_accounts_config(accounts_config: WalletAccountsConfig) -> Self {
        let time_source = SystemTimeSourceStub::new_set(dummy_registration_time());

        let catalog = {
            let mut b = dill::CatalogBuilder::new();

            b.add::<InMemoryAccountRepository>()
                .add::<InMemoryWeb3AuthNonceRepository>()
                .add_value(accounts_config)
                .add_value(Web3AuthConfig::default())
                .add_value(SessionConfig::sample())
                // Cookie stores do not send `Secure` cookies over plain HTTP
                .add_value(SessionCookieConfig { secure: false })
                .add_value(time_source.clone())
                .bind::<dyn SystemTimeSource, SystemTimeSourceStub>();

            cryptotrade_accounts_services::register_dependencies(&mut b);
            cryptotrade_auth_web3_services::register_dependencies(&mut b);

            b.build()
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_server = TestAPIServer::new(catalog.clone(), listener);

        Self {
            api_server,
            catalog,
            time_source,
        }
    }

    pub fn client(&self) -> WalletClient {
        WalletClient::new(format!("http://{}", self.api_server.local_addr()))
    }

    pub async fn api_server_run(self) -> Result<(), InternalError> {
        self.api_server.run().await.int_err()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Browser-like client: keeps cookies between requests
pub struct WalletClient {
    pub http: reqwest::Client,
    base_url: String,
}

pub struct SignedIn {
    pub access_token: String,
    pub body: Value,
}

impl SignedIn {
    pub fn account_id(&self) -> &str {
        self.body["account"]["id"].as_str().unwrap()
    }

    pub fn wallet_id(&self) -> &str {
        self.body["wallet"]["id"].as_str().unwrap()
    }
}

impl WalletClient {
    fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap(),
            base_url,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn request_challenge(&self, wallet_address: &WalletAddress) -> Value {
        let res = self
            .http
            .post(self.url("/auth/challenge"))
            .json(&json!({ "address": wallet_address }))
            .send()
            .await
            .unwrap();

        assert_eq!(200, res.status());
        res.json().await.unwrap()
    }

    /// Issues a challenge for the first address of the provider and signs it
    pub async fn signed_proof(&self, provider: &dyn WalletProvider) -> Value {
        let wallet_address = provider.request_accounts().await.unwrap().remove(0);
        let challenge = self.request_challenge(&wallet_address).await;
        let message = challenge["message"].as_str().unwrap();

        let signature = provider
            .sign_message(&wallet_address, message)
            .await
            .unwrap();

        json!({
            "address": wallet_address,
            "signature": signature,
            "message": message,
            "type": provider.wallet_type(),
        })
    }

    pub async fn verify(&self, proof: &Value) -> reqwest::Response {
        self.http
            .post(self.url("/auth/verify"))
            .json(proof)
            .send()
            .await
            .unwrap()
    }

    pub async fn sign_in(&self, provider: &dyn WalletProvider) -> SignedIn {
        let proof = self.signed_proof(provider).await;

        let res = self.verify(&proof).await;
        assert_eq!(200, res.status());

        let body: Value = res.json().await.unwrap();
        SignedIn {
            access_token: body["accessToken"].as_str().unwrap().to_string(),
            body,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
