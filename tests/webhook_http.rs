//! Integration tests for the chatbot webhook.
//!
//! These tests drive the full Axum router with a recording gateway and a
//! scripted responder, asserting both the HTTP response and every gateway
//! call the delivery produced.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use sales_relay::adapters::waha::{GatewayCall, GatewayOperation};
use sales_relay::adapters::{
    webhook_router, RecordingGateway, ScriptedResponder, WebhookAppState,
};
use sales_relay::domain::foundation::SupportAllowlist;
use sales_relay::domain::messages::{FALLBACK_REPLY, INCOMPLETE_COMMAND};
use sales_relay::domain::tags::TagRules;
use sales_relay::ports::HistoryMessage;

// =============================================================================
// Test Infrastructure
// =============================================================================

const OPERATOR_CHAT: &str = "215470020018431@lid";
const ALERT_CHAT: &str = "215470020018431@lid";
const CUSTOMER_CHAT: &str = "5562999990000@c.us";

struct Harness {
    gateway: RecordingGateway,
    responder: ScriptedResponder,
    flow_timeout: Duration,
}

impl Harness {
    fn new() -> Self {
        Self::with(RecordingGateway::new(), ScriptedResponder::new())
    }

    fn with(gateway: RecordingGateway, responder: ScriptedResponder) -> Self {
        Self {
            gateway,
            responder,
            flow_timeout: Duration::from_secs(5),
        }
    }

    fn flow_timeout(mut self, timeout: Duration) -> Self {
        self.flow_timeout = timeout;
        self
    }

    fn app(&self) -> Router {
        let state = WebhookAppState::new(
            Arc::new(self.gateway.clone()),
            Arc::new(self.responder.clone()),
            SupportAllowlist::new(["215470020018431", "6282027373"]).unwrap(),
            TagRules::default(),
            "lid",
            10,
        )
        .with_flow_timeout(self.flow_timeout);
        webhook_router().with_state(state)
    }

    async fn post_raw(&self, body: &str) -> (StatusCode, Value) {
        let response = self
            .app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chatbot/webhook/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn deliver(&self, from: &str, body: &str) -> (StatusCode, Value) {
        self.post_raw(&json!({"payload": {"from": from, "body": body}}).to_string())
            .await
    }
}

fn send(chat_id: &str, text: &str) -> (String, String) {
    (chat_id.to_string(), text.to_string())
}

// =============================================================================
// Support Commands
// =============================================================================

#[tokio::test]
async fn labeled_support_command_sends_offer() {
    let harness = Harness::new();

    let (status, body) = harness
        .deliver(
            OPERATOR_CHAT,
            "CPF: 123.456.789-00, TEL: 556282027373, VALOR: 1500,00",
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "origin": "support"}));

    let sent = harness.gateway.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "556282027373@c.us");
    assert!(sent[0].1.contains("*R$ 1500,00*"));
    assert_eq!(
        sent[1],
        send(OPERATOR_CHAT, "✅ Oferta de R$ 1500,00 enviada para 556282027373!")
    );
    assert_eq!(harness.responder.call_count(), 0);
}

#[tokio::test]
async fn comma_support_command_routes_like_labeled_form() {
    let harness = Harness::new();

    let (status, body) = harness
        .deliver(OPERATOR_CHAT, "111222333, 556282027373, 2000")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "origin": "support"}));

    let sent = harness.gateway.sent();
    assert_eq!(sent[0].0, "556282027373@c.us");
    assert!(sent[0].1.contains("*R$ 2000*"));
    assert_eq!(sent[1].0, OPERATOR_CHAT);
}

#[tokio::test]
async fn long_phone_resolves_to_lid_channel() {
    let harness = Harness::new();

    harness
        .deliver(OPERATOR_CHAT, "CPF: 1, TEL: 215470020018431, VALOR: 900")
        .await;

    assert_eq!(harness.gateway.sent()[0].0, "215470020018431@lid");
}

#[tokio::test]
async fn incomplete_support_command_prompts_operator_only() {
    let harness = Harness::new();

    let (status, body) = harness.deliver(OPERATOR_CHAT, "CPF: 123, VALOR: 500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "support_command_failed"}));
    assert_eq!(
        harness.gateway.sent(),
        vec![send(OPERATOR_CHAT, INCOMPLETE_COMMAND)]
    );
}

#[tokio::test]
async fn support_sender_on_contact_suffix_is_recognized() {
    let harness = Harness::new();

    let (_, body) = harness
        .deliver("6282027373@c.us", "CPF: 1, TEL: 556282027373, VALOR: 10")
        .await;

    assert_eq!(body["origin"], "support");
    assert_eq!(harness.gateway.sent()[1].0, "6282027373@c.us");
}

// =============================================================================
// Customer Messages
// =============================================================================

#[tokio::test]
async fn plain_reply_goes_to_customer_only() {
    let harness = Harness::with(
        RecordingGateway::new().with_history(vec![
            HistoryMessage::inbound("Oi"),
            HistoryMessage::outbound("Olá! Qual seu nome?"),
        ]),
        ScriptedResponder::new().with_reply("Perfeito, Ana! Qual seu CPF?"),
    );

    let (status, body) = harness.deliver(CUSTOMER_CHAT, "Sou a Ana").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(
        harness.gateway.calls(),
        vec![
            GatewayCall::StartTyping {
                chat_id: CUSTOMER_CHAT.to_string()
            },
            GatewayCall::FetchHistory {
                chat_id: CUSTOMER_CHAT.to_string(),
                limit: 10
            },
            GatewayCall::Send {
                chat_id: CUSTOMER_CHAT.to_string(),
                text: "Perfeito, Ana! Qual seu CPF?".to_string()
            },
            GatewayCall::StopTyping {
                chat_id: CUSTOMER_CHAT.to_string()
            },
        ]
    );

    let calls = harness.responder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].message, "Sou a Ana");
    assert_eq!(calls[0].history.len(), 2);
}

#[tokio::test]
async fn simulation_reply_alerts_primary_operator() {
    let harness = Harness::with(
        RecordingGateway::new(),
        ScriptedResponder::new().with_reply(
            "Vou verificar a melhor proposta no sistema... |||SUPORTE_ALERT: Nome: Ana | CPF: 111|||",
        ),
    );

    let (status, _) = harness.deliver(CUSTOMER_CHAT, "Pode simular?").await;
    assert_eq!(status, StatusCode::OK);

    let sent = harness.gateway.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[0],
        send(CUSTOMER_CHAT, "Vou verificar a melhor proposta no sistema...")
    );
    assert_eq!(sent[1].0, ALERT_CHAT);
    assert!(sent[1].1.contains("Nome: Ana | CPF: 111"));
    assert!(sent[1].1.contains("5562999990000"));
    assert!(!sent[0].1.contains("|||"));
}

#[tokio::test]
async fn closure_reply_alerts_with_bank_details() {
    let harness = Harness::with(
        RecordingGateway::new(),
        ScriptedResponder::new().with_reply(
            "Já encaminhei para o nosso financeiro. |||FECHAMENTO_ALERT: Banco: Itau | Ag: 4321 | Conta: 55555-1|||",
        ),
    );

    harness.deliver(CUSTOMER_CHAT, "Itau, ag 4321").await;

    let sent = harness.gateway.sent();
    assert_eq!(
        sent[0],
        send(CUSTOMER_CHAT, "Já encaminhei para o nosso financeiro.")
    );
    assert_eq!(sent[1].0, ALERT_CHAT);
    assert!(sent[1].1.contains("🏦 *Banco:* Itau"));
    assert!(sent[1].1.contains("🏢 *Agência:* 4321"));
    assert!(sent[1].1.contains("💳 *Conta:* 55555-1"));
}

#[tokio::test]
async fn fallback_reply_is_delivered_as_plain_text() {
    let harness = Harness::with(
        RecordingGateway::new(),
        ScriptedResponder::new().with_reply(FALLBACK_REPLY),
    );

    let (_, body) = harness.deliver(CUSTOMER_CHAT, "Oi").await;

    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(harness.gateway.sent(), vec![send(CUSTOMER_CHAT, FALLBACK_REPLY)]);
}

#[tokio::test]
async fn gateway_failures_do_not_change_the_response() {
    let harness = Harness::with(
        RecordingGateway::new()
            .failing(GatewayOperation::FetchHistory)
            .failing(GatewayOperation::Send),
        ScriptedResponder::new(),
    );

    let (status, body) = harness.deliver(CUSTOMER_CHAT, "Oi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert!(harness.responder.calls()[0].history.is_empty());
}

#[tokio::test]
async fn responder_panic_is_server_error_and_releases_typing() {
    let harness = Harness::with(
        RecordingGateway::new(),
        ScriptedResponder::new().with_panic("model client exploded"),
    );

    let (status, body) = harness.deliver(CUSTOMER_CHAT, "Oi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"status": "error"}));

    let calls = harness.gateway.calls();
    assert_eq!(
        calls.last(),
        Some(&GatewayCall::StopTyping {
            chat_id: CUSTOMER_CHAT.to_string()
        })
    );
    assert!(harness.gateway.sent().is_empty());
}

#[tokio::test]
async fn slow_model_is_server_error_and_releases_typing() {
    let harness = Harness::with(
        RecordingGateway::new(),
        ScriptedResponder::new().with_delay(Duration::from_millis(300)),
    )
    .flow_timeout(Duration::from_millis(100));

    let (status, body) = harness.deliver(CUSTOMER_CHAT, "Oi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"status": "error"}));
    assert_eq!(
        harness.gateway.calls().last(),
        Some(&GatewayCall::StopTyping {
            chat_id: CUSTOMER_CHAT.to_string()
        })
    );
    assert!(harness.gateway.sent().is_empty());
}

// =============================================================================
// Ignored and Malformed Deliveries
// =============================================================================

#[tokio::test]
async fn group_chat_is_ignored_without_gateway_calls() {
    let harness = Harness::new();

    let (status, body) = harness.deliver("120363025@g.us", "Oi pessoal").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ignored"}));
    assert_eq!(harness.gateway.call_count(), 0);
    assert_eq!(harness.responder.call_count(), 0);
}

#[tokio::test]
async fn missing_fields_are_ignored() {
    let harness = Harness::new();

    let (status, body) = harness
        .post_raw(r#"{"payload": {"from": "5562999990000@c.us"}}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ignored"}));

    let (_, body) = harness.post_raw(r#"{"payload": {"body": "Oi"}}"#).await;
    assert_eq!(body, json!({"status": "ignored"}));

    let (_, body) = harness.deliver(CUSTOMER_CHAT, "   ").await;
    assert_eq!(body, json!({"status": "ignored"}));

    assert_eq!(harness.gateway.call_count(), 0);
}

#[tokio::test]
async fn missing_payload_is_bad_request() {
    let harness = Harness::new();

    let (status, body) = harness.post_raw(r#"{"event": "message"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error"}));
    assert_eq!(harness.gateway.call_count(), 0);
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let harness = Harness::new();

    let (status, body) = harness.post_raw("payload=oops").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error"}));
}
