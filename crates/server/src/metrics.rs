//! Prometheus metrics

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;

use lead_triage_core::LeadScoreResponse;

const REQUESTS_TOTAL: &str = "lead_triage_requests_total";
const LEADS_TOTAL: &str = "lead_triage_leads_total";
const ESCALATIONS_TOTAL: &str = "lead_triage_escalations_total";
const SCORE: &str = "lead_triage_score";
const SCORING_SECONDS: &str = "lead_triage_scoring_seconds";

const SCORE_BUCKETS: &[f64] = &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
const LATENCY_BUCKETS: &[f64] = &[0.000_05, 0.000_1, 0.000_25, 0.000_5, 0.001, 0.005, 0.01];

/// Installed at most once per process; `None` when installation failed
static PROMETHEUS: OnceCell<Option<PrometheusHandle>> = OnceCell::new();

/// Install the global Prometheus recorder
pub fn init_metrics() -> Option<PrometheusHandle> {
    PROMETHEUS
        .get_or_init(|| match install() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install Prometheus recorder");
                None
            }
        })
        .clone()
}

fn install() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(SCORE.to_string()), SCORE_BUCKETS)?
        .set_buckets_for_metric(Matcher::Full(SCORING_SECONDS.to_string()), LATENCY_BUCKETS)?
        .install_recorder()
}

/// GET /metrics
pub async fn metrics_handler() -> Response {
    match PROMETHEUS.get().and_then(Option::as_ref) {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "Metrics recorder not installed").into_response(),
    }
}

pub fn record_request(route: &'static str) {
    metrics::counter!(REQUESTS_TOTAL, "route" => route).increment(1);
}

/// Record one scored lead
pub fn record_lead(response: &LeadScoreResponse, elapsed: Duration) {
    metrics::counter!(LEADS_TOTAL, "tag" => response.tag.as_str()).increment(1);
    if response.escalate {
        metrics::counter!(ESCALATIONS_TOTAL).increment(1);
    }
    metrics::histogram!(SCORE).record(response.score);
    metrics::histogram!(SCORING_SECONDS).record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_triage_core::LeadTag;

    #[test]
    fn test_init_metrics_is_idempotent() {
        let first = init_metrics().is_some();
        let second = init_metrics().is_some();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recorded_leads_are_rendered() {
        let Some(handle) = init_metrics() else {
            return;
        };
        record_request("/api/leads/score");
        record_lead(
            &LeadScoreResponse {
                score: 0.9,
                tag: LeadTag::Hot,
                reasons: vec![],
                escalate: true,
            },
            Duration::from_micros(40),
        );

        let rendered = handle.render();
        assert!(rendered.contains(LEADS_TOTAL));
        assert!(rendered.contains(ESCALATIONS_TOTAL));
        assert!(rendered.contains(SCORE));
    }
}
