//! HTTP handler functions for the map API.

use std::sync::MutexGuard;

use actix_web::{HttpResponse, web};
use prop_map_server_models::{
    ApiError, ApiHealth, ApiMapState, ApiMapView, ApiSequenceState, ApiTileLayer,
    SetIndexRequest,
};
use prop_map_session::MapSession;
use prop_map_session::controls::ControlEvent;
use prop_map_session::geojson_renderer::GeoJsonRenderer;
use prop_map_symbols_models::StepDirection;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/map`
///
/// Returns view, tiles, attribute list, and the current sequence state.
pub async fn map(state: web::Data<AppState>) -> HttpResponse {
    let Some(session) = lock(&state) else {
        return poisoned();
    };

    let dataset = session.dataset();
    HttpResponse::Ok().json(ApiMapState {
        dataset_id: dataset.id.clone(),
        dataset_name: dataset.name.clone(),
        kind: dataset.kind,
        view: ApiMapView::from(session.view()),
        tile_layer: ApiTileLayer::from(session.tile_layer()),
        attributes: session
            .attributes()
            .map(|a| a.as_slice().to_vec())
            .unwrap_or_default(),
        baseline: session.baseline().map(|b| b.value()),
        sequence: session.sequence_state().map(ApiSequenceState::from),
    })
}

/// `GET /api/symbols`
///
/// Returns every marker as styled `GeoJSON`.
pub async fn symbols(state: web::Data<AppState>) -> HttpResponse {
    let Some(session) = lock(&state) else {
        return poisoned();
    };
    HttpResponse::Ok().json(session.renderer().to_feature_collection())
}

/// `POST /api/sequence/step/{direction}`
///
/// Handles a forward or reverse step-button click.
pub async fn step(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let Ok(direction) = path.parse::<StepDirection>() else {
        return HttpResponse::BadRequest().json(ApiError {
            error: format!("Unknown step direction: {}", path.as_str()),
        });
    };
    apply(&state, ControlEvent::Step { direction })
}

/// `POST /api/sequence/index`
///
/// Handles slider input.
pub async fn set_index(
    state: web::Data<AppState>,
    body: web::Json<SetIndexRequest>,
) -> HttpResponse {
    apply(&state, ControlEvent::SliderInput { value: body.index })
}

fn apply(state: &AppState, event: ControlEvent) -> HttpResponse {
    let Some(mut session) = lock(state) else {
        return poisoned();
    };

    match session.handle(event) {
        Ok(seq) => HttpResponse::Ok().json(ApiSequenceState::from(seq)),
        Err(e) => {
            log::warn!("Rejected control event {event:?}: {e}");
            HttpResponse::Conflict().json(ApiError {
                error: e.to_string(),
            })
        }
    }
}

fn lock(state: &AppState) -> Option<MutexGuard<'_, MapSession<GeoJsonRenderer>>> {
    state
        .session
        .lock()
        .map_err(|_| log::error!("Map session mutex poisoned"))
        .ok()
}

fn poisoned() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiError {
        error: "Map session unavailable".to_string(),
    })
}
