use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quote_core::{Field, ValidationRules};
use quote_db::InMemoryQuoteStore;
use quote_service::client::{
    DialogKind, FieldValidationApi, FormField, LiveValidator, QuoteApi, QuoteApiClient, QuoteForm,
    SubmitOutcome, ValidationVerdict,
};
use quote_service::services::QuoteService;
use quote_service::startup::{AppState, app};
use tokio::net::TcpListener;

async fn spawn_server() -> (Arc<InMemoryQuoteStore>, SocketAddr) {
    let store = Arc::new(InMemoryQuoteStore::new());
    let service = QuoteService::new(store.clone(), Arc::new(ValidationRules::default()));
    let router = app(AppState::new(service, false));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (store, addr)
}

fn filled_form() -> QuoteForm {
    let mut form = QuoteForm::new();
    form.set_field(FormField::FirstName, "Ram");
    form.set_field(FormField::LastName, "Thapa");
    form.set_field(FormField::District, "Kaski");
    form.set_field(FormField::Phone, "9801234567");
    form.set_field(FormField::DateOfBirth, "1995");
    form.set_field(FormField::Gender, "male");
    form.set_field(FormField::Email, "ram.thapa@example.com");
    form
}

#[tokio::test]
async fn form_submission_round_trip() {
    let (store, addr) = spawn_server().await;
    let api = QuoteApiClient::new(format!("http://{addr}"));

    let mut form = filled_form();
    let dialog = form.submit(&api).await;
    assert_eq!(dialog.kind, DialogKind::Success);
    assert!(form.is_submit_enabled());
    assert_eq!(store.len().await, 1);

    // Same person again: duplicate dialog, values kept.
    let mut again = filled_form();
    let dialog = again.submit(&api).await;
    assert_eq!(dialog.kind, DialogKind::Warning);
    assert_eq!(dialog.message, "Email already exists.");
    assert_eq!(again.value(FormField::Email), "ram.thapa@example.com");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn api_client_maps_statuses() {
    let (_, addr) = spawn_server().await;
    let api = QuoteApiClient::new(format!("http://{addr}/"));

    let mut submission = filled_form().to_submission();
    submission.gender = Some("unknown".to_string());
    let outcome = api.submit_quote(&submission).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Invalid("Please select a valid gender.".to_string())
    );

    let verdict = api.validate_field(Field::Phone, "014123456").await.unwrap();
    assert!(matches!(verdict, ValidationVerdict::Valid(v) if v.normalized == "014123456"));

    let verdict = api.validate_field(Field::Email, "not-an-email").await.unwrap();
    assert!(matches!(verdict, ValidationVerdict::Invalid(_)));
}

#[tokio::test]
async fn unreachable_server_yields_retry_dialog() {
    // Bind then drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let api = QuoteApiClient::new(format!("http://{addr}"));

    let mut form = filled_form();
    let dialog = form.submit(&api).await;

    assert_eq!(dialog.kind, DialogKind::Error);
    assert!(form.is_submit_enabled());
}

#[tokio::test]
async fn live_validation_against_server() {
    let (_, addr) = spawn_server().await;
    let api = Arc::new(QuoteApiClient::new(format!("http://{addr}")));
    let live = LiveValidator::with_debounce(api, Duration::from_millis(20));

    if let Some(handle) = live.on_edit(Field::Phone, "12") {
        handle.await.unwrap();
    }
    assert_eq!(live.error(Field::Phone).as_deref(), Some("Phone number is too short."));

    if let Some(handle) = live.on_edit(Field::Phone, "9812345678") {
        handle.await.unwrap();
    }
    assert_eq!(live.error(Field::Phone), None);
}
