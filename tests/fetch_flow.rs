//! End-to-end fetch behavior: request construction, outcome classification,
//! fallback display and stale-response suppression, exercised through the
//! public event/effect surface.

use crux_core::testing::AppTester;

use skip_selector_core::capabilities::{HttpError, HttpOperation, HttpResponse};
use skip_selector_core::{App, Effect, Event, Model};

type Tester = AppTester<App, Effect>;

fn request_skips(app: &Tester, model: &mut Model) -> crux_core::Request<HttpOperation> {
    let update = app.update(
        Event::SkipsRequested {
            postcode: "NR32".into(),
            area: "Lowestoft".into(),
        },
        model,
    );
    assert!(model.is_loading);

    update
        .effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .expect("fetch should issue an HTTP effect")
}

fn resolve_and_apply(
    app: &Tester,
    model: &mut Model,
    request: &mut crux_core::Request<HttpOperation>,
    result: Result<HttpResponse, HttpError>,
) -> Vec<Effect> {
    let update = app.resolve(request, result).expect("resolve should succeed");
    let mut effects = Vec::new();
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

fn has_render(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Render(_)))
}

#[test]
fn successful_fetch_shows_normalized_remote_skips() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    let HttpOperation::Execute(sent) = request.operation.clone();
    assert_eq!(
        sent.url(),
        "https://app.wewantwaste.co.uk/api/skips/by-location?postcode=NR32&area=Lowestoft"
    );
    assert_eq!(sent.header("Accept"), Some("application/json"));
    assert_eq!(sent.timeout_ms(), 10_000);

    let body = br#"[
        {"id": 17, "size": "6", "price_before_vat": 264, "allowed_on_road": true},
        {"id": "18", "size": 8, "price": 305.5}
    ]"#;
    let effects = resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(200, body.to_vec())),
    );
    assert!(has_render(&effects));

    assert!(!model.is_loading);
    assert!(model.fetch_error.is_none());
    assert!(!model.using_fallback());

    let view = app.view(&model);
    assert_eq!(view.skips.len(), 2);
    assert_eq!(view.skips[0].skip.id.as_str(), "17");
    assert_eq!(view.skips[0].skip.name, "6 Yard Skip");
    assert_eq!(view.skips[0].price_display, "\u{a3}264.00");
    assert_eq!(view.skips[1].skip.price_before_vat, 305.5);
    assert!(!view.is_loading);
    assert!(view.error.is_none());
}

#[test]
fn envelope_payload_resolves_location() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    let body = br#"{
        "skips": [{"id": "1", "size": 4, "price": 211}],
        "location": "Lowestoft, Suffolk",
        "postcode": "NR32 1AB"
    }"#;
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(200, body.to_vec())),
    );

    let view = app.view(&model);
    assert_eq!(view.location, "Lowestoft, Suffolk");
    assert_eq!(view.postcode, "NR32 1AB");
}

#[test]
fn server_error_falls_back_with_message() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(500, Vec::new())),
    );

    let view = app.view(&model);
    assert!(view.using_fallback);
    assert_eq!(view.skips.len(), 7);
    let error = view.error.expect("a 500 must surface an error");
    assert_eq!(error.message, "API request failed with status: 500");
    assert!(error.is_retryable);
}

#[test]
fn empty_result_is_reported_but_not_fatal() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(200, b"[]".to_vec())),
    );

    let view = app.view(&model);
    assert!(view.using_fallback);
    assert_eq!(view.skips.len(), 7);
    assert_eq!(
        view.error.expect("empty payload must surface an error").message,
        "No skip data available"
    );
}

#[test]
fn malformed_body_counts_as_empty() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(200, b"<html>oops</html>".to_vec())),
    );

    let view = app.view(&model);
    assert!(view.using_fallback);
    assert_eq!(
        view.error.expect("undecodable body must surface an error").message,
        "No skip data available"
    );
}

#[test]
fn timeout_classifies_as_network_error() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    let HttpOperation::Execute(sent) = request.operation.clone();
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Err(HttpError::Timeout {
            timeout_ms: 10_000,
            request_id: sent.request_id().to_string(),
        }),
    );

    let view = app.view(&model);
    assert!(view.using_fallback);
    let error = view.error.expect("a timeout must surface an error");
    assert!(error.message.starts_with("Network error: "));
    assert_eq!(error.error_code, "NETWORK_ERROR");
    assert!(error.is_retryable);
}

#[test]
fn stale_response_is_dropped() {
    let app = Tester::default();
    let mut model = Model::default();

    // First request goes out, then the inputs change before it resolves.
    let mut first = request_skips(&app, &mut model);
    let update = app.update(
        Event::SkipsRequested {
            postcode: "IP1".into(),
            area: "Ipswich".into(),
        },
        &mut model,
    );
    let mut second = update
        .effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .expect("second fetch should issue an HTTP effect");

    // The superseded outcome arrives late and must change nothing.
    let stale_body = br#"[{"id": "99", "size": 4, "price": 10}]"#;
    let effects = resolve_and_apply(
        &app,
        &mut model,
        &mut first,
        Ok(HttpResponse::new(200, stale_body.to_vec())),
    );
    assert!(!has_render(&effects));
    assert!(model.is_loading);
    assert!(model.skips.is_empty());

    // The current fetch still lands normally.
    let body = br#"[{"id": "7", "size": 12, "price": 390}]"#;
    resolve_and_apply(
        &app,
        &mut model,
        &mut second,
        Ok(HttpResponse::new(200, body.to_vec())),
    );
    assert!(!model.is_loading);
    assert_eq!(model.skips.len(), 1);
    assert_eq!(model.skips[0].id.as_str(), "7");
}

#[test]
fn new_request_clears_previous_error_and_data() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(404, Vec::new())),
    );
    assert!(model.fetch_error.is_some());

    let mut retry = request_skips(&app, &mut model);
    assert!(model.fetch_error.is_none());

    let body = br#"[{"id": "1", "size": 4, "price": 211}]"#;
    resolve_and_apply(
        &app,
        &mut model,
        &mut retry,
        Ok(HttpResponse::new(200, body.to_vec())),
    );
    assert!(model.fetch_error.is_none());
    assert_eq!(model.skips.len(), 1);
}

#[test]
fn non_object_entries_are_skipped() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = request_skips(&app, &mut model);
    let body = br#"[{"id": "1", "size": 4, "price": 211}, "junk", 42, null]"#;
    resolve_and_apply(
        &app,
        &mut model,
        &mut request,
        Ok(HttpResponse::new(200, body.to_vec())),
    );

    assert!(model.fetch_error.is_none());
    assert_eq!(model.skips.len(), 1);
    assert_eq!(model.skips[0].id.as_str(), "1");
}

#[test]
fn build_failure_surfaces_unexpected_error() {
    let app = Tester::default();
    let mut model = Model::default();
    model.config.api_base = "not a url".into();

    let update = app.update(
        Event::SkipsRequested {
            postcode: "NR32".into(),
            area: "Lowestoft".into(),
        },
        &mut model,
    );
    assert!(!update
        .effects
        .iter()
        .any(|e| matches!(e, Effect::Http(_))));
    assert!(!model.is_loading);

    let view = app.view(&model);
    let error = view.error.expect("an unbuildable request must surface an error");
    assert_eq!(error.message, "An unexpected error occurred");
    assert!(!error.is_retryable);
}
