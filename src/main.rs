//! Sales Relay server entry point.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sales_relay::adapters::{
    webhook_router, ChunkingOptions, KeywordKnowledgeBase, OpenAIConfig, OpenAIProvider,
    RagResponder, ResponderSettings, SystemPromptTemplate, WahaConfig, WahaGateway,
    WebhookAppState,
};
use sales_relay::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let app = build_app(&config)?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, environment = ?config.server.environment, "sales relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("sales relay stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_app(config: &AppConfig) -> anyhow::Result<axum::Router> {
    let gateway_cfg = &config.gateway;
    let gateway = WahaGateway::new(
        WahaConfig::new(gateway_cfg.base_url.clone())
            .with_api_key(
                gateway_cfg
                    .api_key
                    .as_ref()
                    .map(|k| k.expose_secret().clone()),
            )
            .with_session(gateway_cfg.session.clone())
            .with_timeout(gateway_cfg.timeout()),
    )?;

    let ai_cfg = &config.ai;
    let api_key = ai_cfg
        .api_key
        .as_ref()
        .map(|k| k.expose_secret().clone())
        .unwrap_or_default();
    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_provider_name(ai_cfg.provider_name.clone())
            .with_base_url(ai_cfg.base_url.clone())
            .with_model(ai_cfg.model.clone())
            .with_timeout(ai_cfg.timeout())
            .with_max_retries(ai_cfg.max_retries),
    )?;

    let knowledge_cfg = &config.knowledge;
    let knowledge = KeywordKnowledgeBase::load(
        &knowledge_cfg.directory,
        ChunkingOptions::new(knowledge_cfg.chunk_size, knowledge_cfg.chunk_overlap)?,
    )?;

    let rules = config.routing.tag_rules();
    let prompt = match &ai_cfg.system_prompt_path {
        Some(path) => SystemPromptTemplate::from_file(path, &rules)?,
        None => SystemPromptTemplate::builtin(&rules),
    };

    let responder = RagResponder::new(
        Arc::new(provider),
        Arc::new(knowledge),
        prompt,
        ResponderSettings {
            temperature: ai_cfg.temperature,
            max_tokens: ai_cfg.max_tokens,
            history_window: ai_cfg.history_window,
            top_k: knowledge_cfg.top_k,
        },
    );

    let state = WebhookAppState::new(
        Arc::new(gateway),
        Arc::new(responder),
        config.routing.support_allowlist()?,
        rules,
        &config.routing.alert_suffix,
        gateway_cfg.history_limit,
    )
    .with_flow_timeout(config.server.request_timeout());

    Ok(webhook_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
