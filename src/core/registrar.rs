//! Registration of the background worker on page load.

use futures::future::LocalBoxFuture;

use crate::error::RegistrationError;

/// Worker registration capability.
pub trait WorkerRegistry {
    /// Register the worker script at `script_path`, resolving to its scope.
    fn register(&self, script_path: &str) -> LocalBoxFuture<'static, Result<String, RegistrationError>>;
}

/// Register the worker if the host supports it.
///
/// Success and failure are only logged: tracking does not depend on the
/// worker. Returns the registration scope on success.
pub async fn register_worker<R: WorkerRegistry>(
    registry: Option<&R>,
    script_path: &str,
) -> Option<String> {
    let Some(registry) = registry else {
        tracing::info!("worker registration unsupported; skipping");
        return None;
    };

    match registry.register(script_path).await {
        Ok(scope) => {
            tracing::info!(%scope, script = script_path, "worker registered");
            Some(scope)
        }
        Err(e) => {
            tracing::error!(error = %e, script = script_path, "worker registration failed");
            None
        }
    }
}
