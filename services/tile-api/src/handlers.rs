//! HTTP request handlers for the tile API.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wms_common::{BoundingBox, MaxExtent, Tile, WmsError};

use crate::state::AppState;

/// Query parameters for the tiles endpoint.
#[derive(Debug, Deserialize)]
pub struct TilesQuery {
    /// Map CRS of `bbox`, e.g. `EPSG:3857`
    pub crs: Option<String>,
    /// `minx,miny,maxx,maxy` in the map CRS
    pub bbox: Option<String>,
    /// Pixels per map unit
    pub scale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TilesResponse {
    pub layer: String,
    pub crs: String,
    pub scale: f64,
    pub count: usize,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Serialize)]
pub struct LayerSummary {
    pub id: String,
    pub crs: String,
    pub version: String,
    pub max_extent: MaxExtent,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Configured levels; 0 means levels are derived by quad-tree
    pub levels: usize,
}

#[derive(Debug, Serialize)]
pub struct LayersResponse {
    pub layers: Vec<LayerSummary>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub layers: usize,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// An error returned to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// A required query parameter is absent.
    pub fn missing(name: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                code: "MissingParameterValue",
                message: format!("Missing required parameter: {}", name),
            },
        }
    }

    pub fn code(&self) -> &'static str {
        self.body.code
    }
}

impl From<WmsError> for ApiError {
    fn from(err: WmsError) -> Self {
        Self {
            status: StatusCode::from_u16(err.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: ErrorBody {
                code: err.wms_exception_code(),
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// GET /health - Basic health check
pub async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        layers: state.painters().count(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let body = match state.prometheus() {
        Some(handle) => handle.render(),
        None => state.metrics.render(),
    };

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}

/// GET /layers - Configured layers
pub async fn layers_handler(Extension(state): Extension<Arc<AppState>>) -> Json<LayersResponse> {
    let layers = state
        .painters()
        .map(|painter| {
            let layer = painter.layer();
            let config = layer.config();
            LayerSummary {
                id: layer.id().to_string(),
                crs: layer.crs().to_string(),
                version: config.version.clone(),
                max_extent: *layer.max_extent(),
                tile_width: config.tile_width,
                tile_height: config.tile_height,
                levels: layer.catalog().len(),
            }
        })
        .collect();

    Json(LayersResponse { layers })
}

/// GET /layers/:layer/tiles - Tile grid covering a viewport
pub async fn tiles_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(layer): Path<String>,
    Query(params): Query<TilesQuery>,
) -> Result<Json<TilesResponse>, ApiError> {
    state.metrics.record_request(&layer);

    match paint(&state, &layer, params) {
        Ok(response) => {
            state.metrics.record_tiles(&layer, response.count);
            Ok(Json(response))
        }
        Err(err) => {
            state.metrics.record_error(err.code());
            Err(err)
        }
    }
}

fn paint(state: &AppState, layer: &str, params: TilesQuery) -> Result<TilesResponse, ApiError> {
    let painter = state
        .painter(layer)
        .ok_or_else(|| WmsError::LayerNotFound(layer.to_string()))?;

    let crs = params.crs.ok_or_else(|| ApiError::missing("crs"))?;
    let bbox = params.bbox.ok_or_else(|| ApiError::missing("bbox"))?;
    let scale = params.scale.ok_or_else(|| ApiError::missing("scale"))?;

    let bounds = BoundingBox::from_wms_string(&bbox).map_err(WmsError::from)?;
    let scale: f64 = scale
        .trim()
        .parse()
        .map_err(|_| WmsError::InvalidScale(format!("not a number: {}", scale)))?;

    let tiles = painter.paint(&crs, &bounds, scale).map_err(|e| {
        warn!(layer = %layer, crs = %crs, error = %e, "Tile grid request failed");
        e
    })?;
    debug!(layer = %layer, crs = %crs, tiles = tiles.len(), "Tile grid computed");

    Ok(TilesResponse {
        layer: layer.to_string(),
        crs,
        scale,
        count: tiles.len(),
        tiles,
    })
}
