// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::Web3AuthNonce;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_AUTH_MESSAGE_PREAMBLE: &str =
    "Welcome to CryptoTrade.gg!\n\nPlease sign this message to verify your wallet ownership.";

const NONCE_LABEL: &str = "\n\nNonce: ";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The text a wallet is asked to sign.
///
/// Signatures are computed over the exact bytes, so the rendered form must
/// never change for a given preamble and nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Web3AuthMessageTemplate {
    preamble: String,
}

impl Web3AuthMessageTemplate {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn render(&self, nonce: &Web3AuthNonce) -> String {
        format!("{}{NONCE_LABEL}{nonce}", self.preamble)
    }

    /// Recovers the nonce from a message produced by [`Self::render`].
    /// Any other text is rejected.
    pub fn extract_nonce(&self, message: &str) -> Result<Web3AuthNonce, MessageTemplateMismatchError> {
        let nonce = message
            .strip_prefix(self.preamble.as_str())
            .and_then(|rest| rest.strip_prefix(NONCE_LABEL))
            .and_then(|raw| Web3AuthNonce::try_new(raw).ok())
            .ok_or(MessageTemplateMismatchError)?;

        if self.render(&nonce) != message {
            return Err(MessageTemplateMismatchError);
        }

        Ok(nonce)
    }
}

impl Default for Web3AuthMessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_MESSAGE_PREAMBLE)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Message does not match the sign-in message template")]
pub struct MessageTemplateMismatchError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
