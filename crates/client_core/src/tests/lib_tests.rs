use super::*;
use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use shared::error::ProtocolError;
use tokio::{net::TcpListener, sync::mpsc};

type CapturedFields = HashMap<String, String>;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    fields_tx: mpsc::UnboundedSender<CapturedFields>,
}

async fn handle_predict(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut fields = HashMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        fields.insert(name, value);
    }
    let _ = state.fields_tx.send(fields);
    (state.status, state.body.to_string())
}

async fn spawn_predict_server(
    status: StatusCode,
    body: &'static str,
) -> (String, mpsc::UnboundedReceiver<CapturedFields>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (fields_tx, fields_rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/predict", post(handle_predict))
        .with_state(StubState {
            status,
            body,
            fields_tx,
        });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), fields_rx)
}

fn oxidation_form() -> PredictionForm {
    PredictionForm::new("ethanol", "kmno4", "oxidation")
}

const ETHANOL_OXIDATION: &str = r#"{"success":true,"reactant":"ethanol","reactant_svg":"<svg/>",
    "product":"acetaldehyde","product_svg":"<svg id=\"p\"/>","reaction_type":"oxidation",
    "catalyst":"kmno4","reaction_details":"Primary alcohol oxidised to an aldehyde."}"#;

#[tokio::test]
async fn predict_posts_form_fields_as_multipart() {
    let (server_url, mut fields_rx) = spawn_predict_server(StatusCode::OK, ETHANOL_OXIDATION).await;
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let outcome = client.predict(&oxidation_form()).await.expect("predict");

    let fields = fields_rx.recv().await.expect("captured fields");
    assert_eq!(fields.get("compound").map(String::as_str), Some("ethanol"));
    assert_eq!(fields.get("catalyst").map(String::as_str), Some("kmno4"));
    assert_eq!(fields.get("reaction_type").map(String::as_str), Some("oxidation"));
    assert!(!fields.contains_key(SAVE_FLAG_FIELD));

    match outcome {
        PredictionOutcome::Predicted(result) => {
            assert_eq!(result.product.as_deref(), Some("acetaldehyde"));
            assert_eq!(result.product_svg.as_deref(), Some("<svg id=\"p\"/>"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn save_adds_persistence_flag() {
    let (server_url, mut fields_rx) =
        spawn_predict_server(StatusCode::OK, r#"{"success":true}"#).await;
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let outcome = client.save(&oxidation_form()).await.expect("save");
    assert_eq!(outcome, SaveOutcome::Saved);

    let fields = fields_rx.recv().await.expect("captured fields");
    assert_eq!(fields.get(SAVE_FLAG_FIELD).map(String::as_str), Some("true"));
    assert_eq!(fields.get("compound").map(String::as_str), Some("ethanol"));
    assert_eq!(fields.len(), 4);
}

#[tokio::test]
async fn application_failure_is_an_outcome_not_an_error() {
    let (server_url, _fields_rx) = spawn_predict_server(
        StatusCode::OK,
        r#"{"success":false,"error":"Please enter a compound"}"#,
    )
    .await;
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let outcome = client
        .predict(&PredictionForm::new("", "pcc", "oxidation"))
        .await
        .expect("predict");
    assert_eq!(
        outcome,
        PredictionOutcome::Failed {
            error: Some("Please enter a compound".to_string())
        }
    );
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let (server_url, _fields_rx) =
        spawn_predict_server(StatusCode::INTERNAL_SERVER_ERROR, r#"{"success":false}"#).await;
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let err = client
        .predict(&oxidation_form())
        .await
        .expect_err("500 should fail");
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().contains("500"), "unexpected message: {err}");
}

#[tokio::test]
async fn undecodable_body_is_reported_as_malformed() {
    let (server_url, _fields_rx) =
        spawn_predict_server(StatusCode::OK, "<html>maintenance</html>").await;
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let err = client
        .save(&oxidation_form())
        .await
        .expect_err("html should fail");
    assert!(matches!(
        err,
        ClientError::MalformedBody(ProtocolError::InvalidJson(_))
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpPredictionClient::new(&format!("http://{addr}")).expect("client");
    let err = client
        .predict(&oxidation_form())
        .await
        .expect_err("closed port should fail");
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn endpoint_is_resolved_against_server_root() {
    let client = HttpPredictionClient::new("http://127.0.0.1:5000/app/").expect("client");
    assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:5000/predict");
}

#[test]
fn rejects_unparseable_server_url() {
    let err = match HttpPredictionClient::new("not a url") {
        Ok(_) => panic!("should reject"),
        Err(err) => err,
    };
    assert!(matches!(err, ClientError::InvalidServerUrl { .. }));
    assert!(err.to_string().contains("not a url"));
}
