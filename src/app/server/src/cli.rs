// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use cryptotrade_accounts::WalletType;
use cryptotrade_auth_web3::Web3AuthNonce;

use crate::cli_value_parser::{value_parse_nonce, value_parse_wallet_type};

pub const BINARY_NAME: &str = "cryptotrade-server";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Parser)]
#[command(name = BINARY_NAME, version, about = "CryptoTrade.gg wallet authentication server")]
pub struct Cli {
    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Run(RunArgs),

    /// Sign a challenge with a local private key, printing a body ready for
    /// `/auth/verify`
    SignMessage(SignMessageArgs),
}

#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Path to the YAML config file
    #[arg(long, env = "CRYPTOTRADE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Expose HTTP server on specific network interface
    #[arg(long)]
    pub address: Option<IpAddr>,

    /// Expose HTTP server on specific port
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, clap::Args)]
pub struct SignMessageArgs {
    /// Wallet to emulate: `ethereum`, `klaytn` or `solana`
    #[arg(long, value_parser = value_parse_wallet_type)]
    pub wallet_type: WalletType,

    /// Hex-encoded secp256k1 key for EVM wallets, base58 Ed25519 secret for
    /// Solana
    #[arg(long, env = "CRYPTOTRADE_WALLET_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Nonce returned by `/auth/challenge`
    #[arg(long, value_parser = value_parse_nonce)]
    pub nonce: Web3AuthNonce,

    /// Config file to take a custom message preamble from
    #[arg(long, env = "CRYPTOTRADE_CONFIG")]
    pub config: Option<PathBuf>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
