use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::devices::{resolve_device, DevicePage};
use crate::errors::AppError;
use crate::resolver::{DeviceConfiguration, PageStrategyElement};
use crate::state::AppState;

#[derive(Serialize)]
pub struct StrategyResponse {
    pub strategy: Option<String>,
    pub elements: Map<String, Value>,
}

/// Resolves the device and its page fragments off the async runtime.
async fn resolve_page(
    state: &AppState,
    device_id: String,
) -> Result<(DeviceConfiguration, DevicePage), AppError> {
    let resolver = state.resolver.clone();
    let config = state.config.clone();
    let resolved = tokio::task::spawn_blocking(move || {
        let device = resolve_device(&resolver, &config, &device_id)?;
        let page = DevicePage::resolve(&resolver, &device);
        Ok::<_, crate::resolver::ResolverError>((device, page))
    })
    .await??;
    Ok(resolved)
}

/// GET /devices/:device_id
pub async fn handle_device_page(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Response, AppError> {
    let (device, page) = resolve_page(&state, device_id).await?;

    let content_type = HeaderValue::from_str(page.content_type()).unwrap_or_else(|_| {
        warn!(
            "Page strategy mimetype {:?} is not a valid header value, using default",
            page.mime_type
        );
        HeaderValue::from_static(PageStrategyElement::MimeType.default_value())
    });
    let html = page.render(&state.config.app_title, &device);

    Ok(([(header::CONTENT_TYPE, content_type)], html).into_response())
}

/// GET /devices/:device_id/config
pub async fn handle_device_config(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceConfiguration>, AppError> {
    let resolver = state.resolver.clone();
    let config = state.config.clone();
    let device =
        tokio::task::spawn_blocking(move || resolve_device(&resolver, &config, &device_id))
            .await??;
    Ok(Json(device))
}

/// GET /devices/:device_id/strategy
pub async fn handle_device_strategy(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<StrategyResponse>, AppError> {
    let (device, page) = resolve_page(&state, device_id).await?;

    let elements = PageStrategyElement::ALL
        .iter()
        .map(|&element| {
            (
                element.file_name().to_string(),
                Value::String(page.element(element).to_string()),
            )
        })
        .collect();

    Ok(Json(StrategyResponse {
        strategy: device.page_strategy().map(String::from),
        elements,
    }))
}
