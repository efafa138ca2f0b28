//! The app core: a pure state machine over [`Model`], driven by [`Event`]s,
//! projected into a [`ViewModel`] for the shell to render.

use serde::{Deserialize, Serialize};

use crate::capabilities::{Capabilities, HttpError, HttpRequest, HttpResult};
use crate::event::Event;
use crate::model::{Model, Screen};
use crate::skip::{self, Skip};
use crate::{FetchError, SKIPS_BY_LOCATION_PATH};

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        caps.telemetry()
            .counter(&format!("event.{}", event.name()), 1);

        match event {
            Event::SkipsRequested { postcode, area } => {
                self.start_fetch(postcode, area, model, caps);
                caps.render().render();
            }

            Event::SkipsFetched { generation, result } => {
                if generation != model.fetch_generation {
                    // A newer input pair superseded this fetch; the outcome
                    // must not touch the model.
                    caps.telemetry().counter("skips.stale_response_dropped", 1);
                    return;
                }
                model.is_loading = false;
                self.apply_fetch_outcome(*result, model, caps);
                caps.render().render();
            }

            Event::SkipSelected { id } => {
                if model.screen != Screen::Selecting {
                    caps.telemetry()
                        .warn("selection.ignored", "selection outside selecting screen");
                    return;
                }
                if !model.display_skips().iter().any(|skip| skip.id == id) {
                    caps.telemetry()
                        .warn("selection.unknown_id", id.as_str());
                    return;
                }
                model.selected_skip_id = Some(id);
                caps.render().render();
            }

            Event::ContinuePressed => {
                if model.screen != Screen::Selecting || model.selected_skip().is_none() {
                    return;
                }
                model.screen = Screen::Confirming;
                caps.render().render();
            }

            Event::BackPressed => {
                if model.screen != Screen::Confirming {
                    return;
                }
                // The selection survives the trip back.
                model.screen = Screen::Selecting;
                caps.render().render();
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let selected_skip = model.selected_skip().cloned();
        let skips = model
            .display_skips()
            .iter()
            .map(|skip| SkipCardView {
                is_selected: model.selected_skip_id.as_ref() == Some(&skip.id),
                price_display: format_price(skip.price_before_vat),
                skip: skip.clone(),
            })
            .collect();

        ViewModel {
            screen: model.screen,
            can_continue: model.screen == Screen::Selecting && selected_skip.is_some(),
            selected_skip,
            skips,
            is_loading: model.is_loading,
            error: model.fetch_error.as_ref().map(UserFacingError::from),
            using_fallback: model.using_fallback(),
            location: model.resolved_location.clone(),
            postcode: model.resolved_postcode.clone(),
        }
    }
}

impl App {
    fn start_fetch(
        &self,
        postcode: String,
        area: String,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        model.postcode = postcode;
        model.area = area;
        // Until the fetch resolves a location, the inputs are the best answer.
        model.resolved_postcode = model.postcode.clone();
        model.resolved_location = model.area.clone();
        model.skips.clear();
        model.fetch_error = None;
        model.is_loading = true;
        model.fetch_generation += 1;

        match build_skips_request(model) {
            Ok(request) => {
                let generation = model.fetch_generation;
                caps.http().send(request, move |result| Event::SkipsFetched {
                    generation,
                    result: Box::new(result),
                });
            }
            Err(error) => {
                model.is_loading = false;
                model.fetch_error = Some(FetchError::from_http_error(&error));
                caps.telemetry()
                    .error("skips.request_build_failed", &error.to_string());
            }
        }
    }

    fn apply_fetch_outcome(&self, result: HttpResult, model: &mut Model, caps: &Capabilities) {
        match result {
            Ok(response) if response.status() == 200 => {
                match skip::decode_payload(response.body()) {
                    Some(extracted) if !extracted.skips.is_empty() => {
                        let count = extracted.skips.len().to_string();
                        model.skips = extracted.skips;
                        if let Some(location) = extracted.location {
                            model.resolved_location = location;
                        }
                        if let Some(postcode) = extracted.postcode {
                            model.resolved_postcode = postcode;
                        }
                        model.fetch_error = None;
                        caps.telemetry()
                            .event("skips.fetched", &[("count", count.as_str())]);
                    }
                    _ => {
                        let error = FetchError::empty_result();
                        caps.telemetry().warn("skips.empty_result", &error.message);
                        model.fetch_error = Some(error);
                    }
                }
            }
            Ok(response) => {
                let error = FetchError::api_status(response.status());
                caps.telemetry().warn("skips.api_status", &error.message);
                model.fetch_error = Some(error);
            }
            Err(http_error) => {
                let error = FetchError::from_http_error(&http_error);
                caps.telemetry()
                    .error("skips.fetch_failed", &http_error.to_string());
                model.fetch_error = Some(error);
            }
        }
    }
}

fn build_skips_request(model: &Model) -> Result<HttpRequest, HttpError> {
    let mut url =
        url::Url::parse(&model.config.api_base).map_err(|e| HttpError::InvalidUrl {
            url: model.config.api_base.clone(),
            reason: e.to_string(),
        })?;
    url.set_path(SKIPS_BY_LOCATION_PATH);
    url.query_pairs_mut()
        .clear()
        .append_pair("postcode", &model.postcode)
        .append_pair("area", &model.area);

    HttpRequest::get(url)?
        .with_header("Accept", "application/json")?
        .with_header("Content-Type", "application/json")?
        .with_timeout_ms(model.config.fetch_timeout_ms)
}

fn format_price(amount: f64) -> String {
    format!("\u{a3}{amount:.2}")
}

/// A skip plus everything the shell needs to draw its card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkipCardView {
    pub skip: Skip,
    pub is_selected: bool,
    pub price_display: String,
}

/// The error as shown to the user; the classification detail stays in the
/// model and in telemetry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub error_code: String,
    pub is_retryable: bool,
}

impl From<&FetchError> for UserFacingError {
    fn from(error: &FetchError) -> Self {
        Self {
            message: error.message.clone(),
            error_code: error.code().to_string(),
            is_retryable: error.is_retryable(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub screen: Screen,
    pub skips: Vec<SkipCardView>,
    pub selected_skip: Option<Skip>,
    pub can_continue: bool,
    pub is_loading: bool,
    pub error: Option<UserFacingError>,
    pub using_fallback: bool,
    pub location: String,
    pub postcode: String,
}
