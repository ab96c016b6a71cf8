//! Blocking bridge for the async HTTP providers

use crate::LlmError;
use std::future::Future;

/// Run a provider future to completion on a private current-thread runtime
///
/// The `TextGenerator` trait is synchronous. Callers already inside a tokio
/// runtime must invoke providers from `spawn_blocking`.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}
