use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use models::{listing::{parse_price, DEFAULT_IMAGE}, NewListing};
use serde::Deserialize;
use serde_json::json;
use service::errors::ServiceError;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Fields of the provider "add service" form. Everything arrives as text.
#[derive(Debug, Default, Deserialize)]
pub struct ListingForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TryFrom<ListingForm> for NewListing {
    type Error = ServiceError;

    fn try_from(form: ListingForm) -> Result<Self, Self::Error> {
        let name = non_empty(form.name).ok_or_else(|| ServiceError::Validation("name is required".into()))?;
        let description =
            non_empty(form.description).ok_or_else(|| ServiceError::Validation("description is required".into()))?;
        let price = parse_price(form.price.as_deref().unwrap_or_default())?;
        Ok(NewListing {
            name,
            description,
            price,
            image: Some(non_empty(form.image).unwrap_or_else(|| DEFAULT_IMAGE.to_string())),
            source: None,
            category: non_empty(form.category),
            provider: non_empty(form.provider),
            duration: non_empty(form.duration),
        })
    }
}

fn failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": "Failed to add service"})),
    )
        .into_response()
}

/// File-backed write path: append the submitted listing to `services.json`
/// and add it to the running catalog under the same id.
/// Any failure, including a malformed form, answers 500.
pub async fn submit_listing(State(state): State<AppState>, form: Result<Form<ListingForm>, FormRejection>) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            error!(err = %rejection, "add service form rejected");
            return failed();
        }
    };
    let input = match NewListing::try_from(form) {
        Ok(input) => input,
        Err(e) => {
            error!(err = %e, "add service form invalid");
            return failed();
        }
    };
    let writer = &state.writer;
    match state.catalog.add_listing_via(|floor| writer.append(input, floor)).await {
        Ok(written) => {
            if let Some(warning) = written.warning() {
                warn!(id = written.value.id, %warning, "submitted service not saved to override layer");
            }
            let listing = written.into_value();
            info!(id = listing.id, name = %listing.name, "service submitted");
            Json(json!({"success": true, "service": listing})).into_response()
        }
        Err(e) => {
            error!(err = %e, "error adding service");
            failed()
        }
    }
}
