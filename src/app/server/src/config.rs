// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use cryptotrade_accounts::{LastWalletRemovalPolicy, WalletAccountsConfig};
use cryptotrade_adapter_http::SessionCookieConfig;
use cryptotrade_auth_web3::{
    DEFAULT_AUTH_MESSAGE_PREAMBLE,
    ENV_VAR_CRYPTOTRADE_JWT_SECRET,
    SessionConfig,
    Web3AuthConfig,
    Web3AuthMessageTemplate,
};
use duration_string::DurationString;
use merge::Merge;
use serde::Deserialize;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Server configuration as read from YAML.
///
/// Every value is optional in the file. Missing ones are filled from
/// [`ServerConfig::builtin`] via [`Merge`].
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Merge)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServerConfig {
    #[merge(strategy = merge::option::recurse)]
    pub auth: Option<AuthConfig>,

    #[merge(strategy = merge::option::recurse)]
    pub wallets: Option<WalletsConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Merge)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AuthConfig {
    /// How long an issued challenge can be answered, e.g. `10m`
    #[merge(strategy = merge::option::overwrite_none)]
    pub nonce_ttl: Option<DurationString>,

    /// Lifetime of an issued session, e.g. `24h`
    #[merge(strategy = merge::option::overwrite_none)]
    pub session_ttl: Option<DurationString>,

    /// Secret used to sign session tokens. `CRYPTOTRADE_JWT_SECRET` takes
    /// precedence when set.
    #[merge(strategy = merge::option::overwrite_none)]
    pub jwt_secret: Option<String>,

    /// Whether the session cookie is marked `Secure`
    #[merge(strategy = merge::option::overwrite_none)]
    pub secure_cookies: Option<bool>,

    /// Whether signing in with an unknown wallet creates an account
    #[merge(strategy = merge::option::overwrite_none)]
    pub sign_up_via_wallet: Option<bool>,

    /// Text shown above the nonce in the message users sign
    #[merge(strategy = merge::option::overwrite_none)]
    pub message_preamble: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Merge)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct WalletsConfig {
    /// `require-alternative-credential` or `allow`
    #[merge(strategy = merge::option::overwrite_none)]
    pub last_wallet_removal: Option<LastWalletRemovalPolicy>,
}

impl ServerConfig {
    pub fn builtin() -> Self {
        Self {
            auth: Some(AuthConfig {
                nonce_ttl: Some(std::time::Duration::from_secs(10 * 60).into()),
                session_ttl: Some(std::time::Duration::from_secs(24 * 60 * 60).into()),
                jwt_secret: None,
                secure_cookies: Some(true),
                sign_up_via_wallet: Some(true),
                message_preamble: Some(DEFAULT_AUTH_MESSAGE_PREAMBLE.to_string()),
            }),
            wallets: Some(WalletsConfig {
                last_wallet_removal: Some(LastWalletRemovalPolicy::default()),
            }),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid config without overrides
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads the file, if given, and fills the gaps with built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading config");
                let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_yaml(&yaml)?
            }
            None => Self::default(),
        };

        config.merge(Self::builtin());
        Ok(config)
    }

    pub fn message_template(&self) -> Web3AuthMessageTemplate {
        self.auth
            .as_ref()
            .and_then(|auth| auth.message_preamble.as_deref())
            .map(Web3AuthMessageTemplate::new)
            .unwrap_or_default()
    }

    /// Converts the config into the values the services are built from.
    ///
    /// `jwt_secret_from_env` is passed in rather than read here so callers
    /// decide where the environment comes from.
    pub fn resolve(
        &self,
        jwt_secret_from_env: Option<String>,
    ) -> Result<ResolvedServerConfig, ConfigError> {
        let auth = self.auth.clone().unwrap_or_default();
        let wallets = self.wallets.clone().unwrap_or_default();

        let jwt_secret = jwt_secret_from_env
            .filter(|s| !s.is_empty())
            .or(auth.jwt_secret)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let nonce_ttl = required_duration("auth.nonceTtl", auth.nonce_ttl)?;
        let session_ttl = required_duration("auth.sessionTtl", auth.session_ttl)?;

        Ok(ResolvedServerConfig {
            web3_auth: Web3AuthConfig {
                message_template: self.message_template(),
                nonce_ttl,
            },
            session: SessionConfig {
                jwt_secret,
                session_ttl,
            },
            session_cookie: SessionCookieConfig {
                secure: auth.secure_cookies.unwrap_or(true),
            },
            wallet_accounts: WalletAccountsConfig {
                sign_up_via_wallet: auth.sign_up_via_wallet.unwrap_or(true),
                last_wallet_removal: wallets.last_wallet_removal.unwrap_or_default(),
            },
        })
    }

    pub fn resolve_from_env(&self) -> Result<ResolvedServerConfig, ConfigError> {
        self.resolve(std::env::var(ENV_VAR_CRYPTOTRADE_JWT_SECRET).ok())
    }
}

fn required_duration(
    key: &'static str,
    value: Option<DurationString>,
) -> Result<chrono::Duration, ConfigError> {
    let Some(value) = value else {
        return Err(ConfigError::InvalidValue {
            key,
            reason: "value is missing".to_string(),
        });
    };

    let std_duration: std::time::Duration = value.into();
    if std_duration.is_zero() {
        return Err(ConfigError::InvalidValue {
            key,
            reason: "duration must be positive".to_string(),
        });
    }

    chrono::Duration::from_std(std_duration).map_err(|e| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Typed values registered in the DI catalog
#[derive(Debug, Clone)]
pub struct ResolvedServerConfig {
    pub web3_auth: Web3AuthConfig,
    pub session: SessionConfig,
    pub session_cookie: SessionCookieConfig,
    pub wallet_accounts: WalletAccountsConfig,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error(
        "JWT secret is not configured: set auth.jwtSecret or the {ENV_VAR_CRYPTOTRADE_JWT_SECRET} \
         environment variable"
    )]
    MissingJwtSecret,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
