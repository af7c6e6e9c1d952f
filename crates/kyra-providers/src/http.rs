//! Blocking HTTP plumbing shared by the providers.

use std::future::Future;
use std::time::Duration;

use kyra_core::errors::ConfigError;

/// Run `fut` to completion on a fresh current-thread runtime.
///
/// A thread already inside a tokio runtime cannot start another one, so
/// such callers get the runtime on a scoped helper thread instead.
pub(crate) fn block_on<F>(fut: F) -> Result<F::Output, String>
where
    F: Future + Send,
    F::Output: Send,
{
    if tokio::runtime::Handle::try_current().is_err() {
        return run_to_completion(fut);
    }
    std::thread::scope(|scope| {
        scope
            .spawn(|| run_to_completion(fut))
            .join()
            .map_err(|_| "provider thread panicked".to_string())?
    })
}

fn run_to_completion<F: Future>(fut: F) -> Result<F::Output, String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("runtime error: {e}"))?;
    Ok(rt.block_on(fut))
}

/// A client bound to the runtime of the current call.
pub(crate) fn client(timeout: Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("client error: {e}"))
}

/// `<base>/<path>` with exactly one slash between them.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Read an API key from the environment variable `name`.
pub fn api_key_from_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingCredential {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(endpoint("http://localhost:8000", "api/v1"), "http://localhost:8000/api/v1");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = api_key_from_env("KYRA_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn block_on_runs_future() {
        assert_eq!(block_on(async { 2 + 2 }).unwrap(), 4);
    }

    #[test]
    fn block_on_inside_runtime_uses_helper_thread() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let nested = rt.block_on(async { block_on(async { 1 }) });
        assert_eq!(nested.unwrap(), 1);
    }

    #[test]
    fn block_on_from_spawn_blocking_succeeds() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let result = rt.block_on(async {
            tokio::task::spawn_blocking(|| block_on(async { 7 }))
                .await
                .unwrap()
        });
        assert_eq!(result.unwrap(), 7);
    }
}
