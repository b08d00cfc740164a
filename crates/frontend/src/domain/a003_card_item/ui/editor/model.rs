use contracts::shared::error::DashboardError;
use gloo_net::http::Request;
use web_sys::RequestMode;

/// Check that the favicon service answers for `icon_url`.
///
/// The request is opaque (`no-cors`), so only reachability is known.
pub async fn check_favicon(icon_url: &str) -> Result<(), DashboardError> {
    Request::get(icon_url)
        .mode(RequestMode::NoCors)
        .send()
        .await
        .map(|_| ())
        .map_err(|e| DashboardError::NetworkDegraded(format!("favicon check failed: {}", e)))
}
