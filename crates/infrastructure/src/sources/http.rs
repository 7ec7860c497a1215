use propcast_domain::DomainError;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::time::Duration;

/// Shared HTTP client with connection pooling. Individual requests carry
/// their own timeout at or below the fan-out per-source deadline.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .user_agent(concat!("propcast/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(2)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

fn map_error(source_name: &str, e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::SourceTimeout(source_name.to_string())
    } else {
        DomainError::SourceUnavailable(format!("{source_name}: {e}"))
    }
}

async fn get(
    source_name: &str,
    url: &str,
    timeout: Duration,
) -> Result<reqwest::Response, DomainError> {
    let response = SHARED_CLIENT
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| map_error(source_name, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DomainError::UpstreamStatus {
            source_name: source_name.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

pub(crate) async fn get_text(
    source_name: &str,
    url: &str,
    timeout: Duration,
) -> Result<String, DomainError> {
    get(source_name, url, timeout)
        .await?
        .text()
        .await
        .map_err(|e| map_error(source_name, e))
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    source_name: &str,
    url: &str,
    timeout: Duration,
) -> Result<T, DomainError> {
    get(source_name, url, timeout)
        .await?
        .json()
        .await
        .map_err(|e| DomainError::InvalidResponse(format!("{source_name}: {e}")))
}
