// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;
use cryptotrade_accounts::{LastWalletRemovalPolicy, WalletAccountsConfig, WalletID, WalletType};
use cryptotrade_auth_web3::WalletProvider;
use cryptotrade_auth_web3_services::{EvmLocalWalletProvider, SolanaLocalWalletProvider};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::harness::{HttpHarness, SignedIn, WalletClient, await_client_server_flow};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl WalletClient {
    async fn list_wallets(&self, session: &SignedIn) -> Vec<Value> {
        let res = self
            .http
            .get(self.url("/wallets"))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .unwrap();

        assert_eq!(200, res.status());
        res.json().await.unwrap()
    }

    async fn add_wallet(&self, session: &SignedIn, provider: &dyn WalletProvider) -> reqwest::Response {
        let proof = self.signed_proof(provider).await;

        self.http
            .post(self.url("/wallets"))
            .bearer_auth(&session.access_token)
            .json(&proof)
            .send()
            .await
            .unwrap()
    }

    async fn set_primary(&self, session: &SignedIn, wallet_id: &str) -> reqwest::StatusCode {
        self.http
            .put(self.url(&format!("/wallets/{wallet_id}/primary")))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .unwrap()
            .status()
    }

    async fn rename_wallet(
        &self,
        session: &SignedIn,
        wallet_id: &str,
        nickname: Value,
    ) -> reqwest::Response {
        self.http
            .patch(self.url(&format!("/wallets/{wallet_id}")))
            .bearer_auth(&session.access_token)
            .json(&json!({ "nickname": nickname }))
            .send()
            .await
            .unwrap()
    }

    async fn get_primary_wallet(&self, session: &SignedIn) -> reqwest::Response {
        self.http
            .get(self.url("/wallets/primary"))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .unwrap()
    }

    async fn remove_wallet(&self, session: &SignedIn, wallet_id: &str) -> reqwest::Response {
        self.http
            .delete(self.url(&format!("/wallets/{wallet_id}")))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .unwrap()
    }
}

fn addresses(wallets: &[Value]) -> Vec<&str> {
    wallets
        .iter()
        .map(|wallet| wallet["address"].as_str().unwrap())
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_add_wallet() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let time_source = harness.time_source.clone();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let phantom = SolanaLocalWalletProvider::random().unwrap();

    let client = async move {
        let metamask_address = metamask.request_accounts().await.unwrap().remove(0);
        let phantom_address = phantom.request_accounts().await.unwrap().remove(0);
        let session = client.sign_in(&metamask).await;

        time_source.advance(Duration::minutes(1));

        let res = client.add_wallet(&session, &phantom).await;
        assert_eq!(201, res.status());

        let added: Value = res.json().await.unwrap();
        assert_eq!(added["address"], phantom_address.as_str());
        assert_eq!(added["type"], "solana");
        assert_eq!(added["isPrimary"], false);

        let wallets = client.list_wallets(&session).await;
        assert_eq!(
            addresses(&wallets),
            vec![metamask_address.as_str(), phantom_address.as_str()]
        );

        // Signing in with the added wallet resolves the same account
        let via_phantom = client.sign_in(&phantom).await;
        assert_eq!(via_phantom.body["isNewAccount"], false);
        assert_eq!(via_phantom.account_id(), session.account_id());
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_add_wallet_bound_elsewhere() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let kaikas = EvmLocalWalletProvider::random(WalletType::Klaytn).unwrap();

    let client = async move {
        let session = client.sign_in(&metamask).await;
        let other_session = client.sign_in(&kaikas).await;
        assert_ne!(session.account_id(), other_session.account_id());

        let res = client.add_wallet(&session, &kaikas).await;
        assert_eq!(409, res.status());

        // Adding an own wallet again is a conflict as well
        let res = client.add_wallet(&session, &metamask).await;
        assert_eq!(409, res.status());

        assert_eq!(client.list_wallets(&session).await.len(), 1);
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_add_wallet_requires_proof() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let victim = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();

    let client = async move {
        let session = client.sign_in(&metamask).await;
        let victim_address = victim.request_accounts().await.unwrap().remove(0);

        // Challenge of the victim signed with an own key
        let challenge = client.request_challenge(&victim_address).await;
        let message = challenge["message"].as_str().unwrap();
        let own_address = metamask.request_accounts().await.unwrap().remove(0);
        let signature = metamask.sign_message(&own_address, message).await.unwrap();

        let res = client
            .http
            .post(client.url("/wallets"))
            .bearer_auth(&session.access_token)
            .json(&json!({
                "address": victim_address,
                "signature": signature,
                "message": message,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(401, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({ "message": "Authentication failed" })
        );

        // Without a session
        let proof = client.signed_proof(&victim).await;
        let res = reqwest::Client::new()
            .post(client.url("/wallets"))
            .json(&proof)
            .send()
            .await
            .unwrap();
        assert_eq!(401, res.status());

        assert_eq!(client.list_wallets(&session).await.len(), 1);
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_primary_wallet() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let kaikas = EvmLocalWalletProvider::random(WalletType::Klaytn).unwrap();
    let stranger = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();

    let client = async move {
        let session = client.sign_in(&metamask).await;
        let other_session = client.sign_in(&stranger).await;

        let added: Value = client
            .add_wallet(&session, &kaikas)
            .await
            .json()
            .await
            .unwrap();
        let kaikas_id = added["id"].as_str().unwrap();

        assert_eq!(204, client.set_primary(&session, kaikas_id).await);

        let wallets = client.list_wallets(&session).await;
        assert_eq!(wallets[0]["id"], kaikas_id);
        assert_eq!(wallets[0]["isPrimary"], true);
        assert_eq!(wallets[1]["isPrimary"], false);

        // Repeating is a no-op
        assert_eq!(204, client.set_primary(&session, kaikas_id).await);

        // Unknown wallet and wallet of another account
        let unknown_id = WalletID::new_generated().to_string();
        assert_eq!(404, client.set_primary(&session, &unknown_id).await);
        assert_eq!(
            404,
            client
                .set_primary(&session, other_session.wallet_id())
                .await
        );

        assert_eq!(
            client.list_wallets(&other_session).await[0]["isPrimary"],
            true
        );
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_remove_wallet() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let kaikas = EvmLocalWalletProvider::random(WalletType::Klaytn).unwrap();
    let stranger = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();

    let client = async move {
        let kaikas_address = kaikas.request_accounts().await.unwrap().remove(0);
        let session = client.sign_in(&metamask).await;
        let other_session = client.sign_in(&stranger).await;
        assert_eq!(201, client.add_wallet(&session, &kaikas).await.status());

        // Removing the primary wallet promotes the remaining one
        let res = client.remove_wallet(&session, session.wallet_id()).await;
        assert_eq!(204, res.status());

        let wallets = client.list_wallets(&session).await;
        assert_eq!(addresses(&wallets), vec![kaikas_address.as_str()]);
        assert_eq!(wallets[0]["isPrimary"], true);

        // The last wallet stays
        let last_wallet_id = wallets[0]["id"].as_str().unwrap();
        let res = client.remove_wallet(&session, last_wallet_id).await;
        assert_eq!(409, res.status());
        assert_eq!(client.list_wallets(&session).await.len(), 1);

        // Unknown wallet and wallet of another account
        let res = client.remove_wallet(&session, session.wallet_id()).await;
        assert_eq!(404, res.status());
        let res = client
            .remove_wallet(&session, other_session.wallet_id())
            .await;
        assert_eq!(404, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({ "message": "Not Found" })
        );
        assert_eq!(client.list_wallets(&other_session).await.len(), 1);

        let res = client.remove_wallet(&session, "not-a-wallet-id").await;
        assert_eq!(400, res.status());
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_list_wallets_primary_first() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let kaikas = EvmLocalWalletProvider::random(WalletType::Klaytn).unwrap();
    let phantom = SolanaLocalWalletProvider::random().unwrap();

    let client = async move {
        let session = client.sign_in(&metamask).await;

        // Same creation time, so the wallet id decides between them
        let providers: [&dyn WalletProvider; 2] = [&kaikas, &phantom];
        let mut added = Vec::new();
        for provider in providers {
            let res = client.add_wallet(&session, provider).await;
            assert_eq!(201, res.status());
            let wallet: Value = res.json().await.unwrap();
            added.push(wallet["id"].as_str().unwrap().parse::<WalletID>().unwrap());
        }
        added.sort();

        let mut expected = vec![session.wallet_id().to_string()];
        expected.extend(added.iter().map(ToString::to_string));

        let wallets = client.list_wallets(&session).await;
        assert_eq!(
            wallets
                .iter()
                .map(|w| w["id"].as_str().unwrap().to_string())
                .collect::<Vec<_>>(),
            expected
        );

        // Promoting the last listed wallet moves it to the front
        let last = expected.pop().unwrap();
        assert_eq!(204, client.set_primary(&session, &last).await);
        expected.insert(0, last);

        let wallets = client.list_wallets(&session).await;
        assert_eq!(
            wallets
                .iter()
                .map(|w| w["id"].as_str().unwrap().to_string())
                .collect::<Vec<_>>(),
            expected
        );
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_primary_wallet() {
    let harness = HttpHarness::with_accounts_config(WalletAccountsConfig {
        last_wallet_removal: LastWalletRemovalPolicy::Allow,
        ..WalletAccountsConfig::default()
    })
    .await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let kaikas = EvmLocalWalletProvider::random(WalletType::Klaytn).unwrap();

    let client = async move {
        let session = client.sign_in(&metamask).await;

        let res = client.get_primary_wallet(&session).await;
        assert_eq!(200, res.status());
        let primary: Value = res.json().await.unwrap();
        assert_eq!(primary["id"], session.wallet_id());
        assert_eq!(primary["isPrimary"], true);

        let added: Value = client
            .add_wallet(&session, &kaikas)
            .await
            .json()
            .await
            .unwrap();
        let kaikas_id = added["id"].as_str().unwrap();
        assert_eq!(204, client.set_primary(&session, kaikas_id).await);

        let primary: Value = client
            .get_primary_wallet(&session)
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(primary["id"], kaikas_id);

        // No wallets left
        for wallet_id in [session.wallet_id(), kaikas_id] {
            assert_eq!(204, client.remove_wallet(&session, wallet_id).await.status());
        }
        let res = client.get_primary_wallet(&session).await;
        assert_eq!(404, res.status());

        // Without a session
        let res = reqwest::get(client.url("/wallets/primary")).await.unwrap();
        assert_eq!(401, res.status());
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_rename_wallet() {
    let harness = HttpHarness::new().await;
    let client = harness.client();
    let metamask = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();
    let stranger = EvmLocalWalletProvider::random(WalletType::Ethereum).unwrap();

    let client = async move {
        let session = client.sign_in(&metamask).await;
        let other_session = client.sign_in(&stranger).await;
        assert_eq!(session.body["wallet"]["nickname"], Value::Null);

        let res = client
            .rename_wallet(&session, session.wallet_id(), json!("  Main  "))
            .await;
        assert_eq!(200, res.status());
        let renamed: Value = res.json().await.unwrap();
        assert_eq!(renamed["id"], session.wallet_id());
        assert_eq!(renamed["nickname"], "Main");

        assert_eq!(client.list_wallets(&session).await[0]["nickname"], "Main");

        let res = client
            .rename_wallet(&session, session.wallet_id(), json!("x".repeat(65)))
            .await;
        assert_eq!(400, res.status());

        // Wallet of another account and unknown wallet
        let res = client
            .rename_wallet(&session, other_session.wallet_id(), json!("Mine"))
            .await;
        assert_eq!(404, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({ "message": "Not Found" })
        );
        let unknown_id = WalletID::new_generated().to_string();
        let res = client.rename_wallet(&session, &unknown_id, json!("Mine")).await;
        assert_eq!(404, res.status());
        assert_eq!(
            client.list_wallets(&other_session).await[0]["nickname"],
            Value::Null
        );

        let res = client
            .rename_wallet(&session, session.wallet_id(), Value::Null)
            .await;
        assert_eq!(200, res.status());
        assert_eq!(res.json::<Value>().await.unwrap()["nickname"], Value::Null);
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
