// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod api_server;
pub mod app;
pub mod cli;
pub(crate) mod cli_value_parser;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use api_server::*;
pub use app::*;
pub use cli::*;
pub use config::*;
pub use error::*;
