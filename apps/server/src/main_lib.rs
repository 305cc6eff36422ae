use std::sync::Arc;

use crate::{config::Config, domain_events::WebDomainEventSink};
use showcase_connect::{
    AnalyticsApiClient, ApiClient, BillingApiClient, CampaignApiClient, DspApiClient,
    DspSyncService,
};
use showcase_core::{
    events::DomainEventSink,
    rebalance::{RebalanceService, RebalanceServiceTrait},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    /// Domain event sink feeding the rebalance queue worker.
    pub domain_event_sink: Arc<dyn DomainEventSink>,
    pub rebalance_service: Arc<dyn RebalanceServiceTrait>,
}

impl AppState {
    /// Wires the event sink to the rebalance service and starts its worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(rebalance_service: Arc<dyn RebalanceServiceTrait>) -> Arc<Self> {
        let sink = Arc::new(WebDomainEventSink::new());
        sink.start_worker(rebalance_service.clone());
        Arc::new(Self {
            domain_event_sink: sink,
            rebalance_service,
        })
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("SHOWCASE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if config.api_token.is_empty() {
        tracing::warn!("SHOWCASE_API_TOKEN is not set, platform API calls will be unauthenticated");
    }
    if config.dsp_advertiser_id.is_empty() {
        tracing::warn!("SHOWCASE_DSP_ADVERTISER_ID is not set, DSP sync will fail");
    }

    let timeout = Some(config.request_timeout);
    let platform_api = ApiClient::new(&config.api_url, &config.api_token, timeout)?;
    let campaign_api = Arc::new(CampaignApiClient::new(
        platform_api.clone().with_label("CampaignApi"),
    ));
    let billing_api = Arc::new(BillingApiClient::new(
        platform_api.clone().with_label("BillingApi"),
    ));
    let analytics_api = Arc::new(AnalyticsApiClient::new(
        platform_api.with_label("AnalyticsApi"),
    ));

    let dsp_api = ApiClient::new(&config.dsp_api_url, &config.dsp_api_token, timeout)?;
    let dsp_sync = Arc::new(DspSyncService::new(Arc::new(DspApiClient::new(
        dsp_api,
        &config.dsp_advertiser_id,
    ))));

    let rebalance_service: Arc<dyn RebalanceServiceTrait> = Arc::new(RebalanceService::new(
        campaign_api,
        billing_api,
        analytics_api,
        dsp_sync,
        config.rebalance.clone(),
    )?);
    tracing::info!(
        "Rebalance service ready (platform: {}, dsp: {}, zero allocation: {:?})",
        config.api_url,
        config.dsp_api_url,
        config.rebalance.zero_allocation_policy
    );

    Ok(AppState::new(rebalance_service))
}
