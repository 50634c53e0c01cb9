//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;

use crate::config::DNS_ATTEMPTS;
use crate::error_handling::InitializationError;

/// Builds the resolver options used for every squash query.
///
/// `ndots` is 0 so that names are never expanded with search domains: SPF
/// targets are always fully qualified.
pub fn resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts
}

/// Initializes the DNS resolver for SPF flattening.
///
/// By default uses hickory's built-in upstream configuration (Google public
/// DNS). With `use_system_config` the host's resolver configuration
/// (`/etc/resolv.conf` or the platform equivalent) is read instead; the
/// timeout and attempt overrides apply either way.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the system configuration
/// was requested and cannot be read.
pub fn init_resolver(
    timeout: Duration,
    use_system_config: bool,
) -> Result<Arc<TokioResolver>, InitializationError> {
    let opts = resolver_opts(timeout);

    let builder = if use_system_config {
        TokioResolver::builder_tokio()
            .map_err(|e| InitializationError::DnsResolverError(e.to_string()))?
    } else {
        TokioResolver::builder_with_config(
            ResolverConfig::default(),
            TokioConnectionProvider::default(),
        )
    };

    Ok(Arc::new(builder.with_options(opts).build()))
}
