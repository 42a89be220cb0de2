use thiserror::Error;

use crate::provider::ProviderId;

/// Errors that abort a route pipeline call.
///
/// Remote failures for a single sample or city never show up here; they
/// degrade to "no city" or a fallback observation instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(
        "No API key configured for provider '{provider}'.\n\
         Hint: run `routecast configure {provider}` or set {}.",
        .provider.env_var()
    )]
    MissingCredential { provider: ProviderId },
}
