// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOGGING_CONFIG: &str = "info,tower_http=info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";
const TRACE_LOGGING_CONFIG: &str = "trace";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Logs to stderr. `RUST_LOG` takes precedence over the verbosity flag.
pub fn configure_logging(verbosity_level: u8) {
    // Tests and embedders may have installed their own subscriber
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity_level {
        0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
        1 => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        _ => EnvFilter::new(TRACE_LOGGING_CONFIG),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    // Redirect all standard logging to tracing events
    LogTracer::init().expect("Failed to set LogTracer");

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}
