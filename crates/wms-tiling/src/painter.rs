//! Paint orchestration: viewport in, tiles out.

use std::fmt;
use std::sync::Arc;

use projection::Reprojector;
use tracing::{debug, trace, warn};
use wms_common::{BoundingBox, Crs, Tile, TileIndex, WmsError, WmsResult};

use crate::{compute_grid, scale_for_layer, screen_bbox, BoundsTransformer, TileLayer, TileRequestBuilder};

/// Progress of a single paint call, in the order stages are reached.
///
/// `Reprojected` is only reached when the map CRS differs from the layer
/// CRS; clipping always happens in layer coordinates, after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStage {
    Idle,
    Reprojected,
    BoundsClipped,
    ResolutionSelected,
    GridComputed,
    TilesBuilt,
    Done,
    Failed,
}

impl fmt::Display for PaintStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaintStage::Idle => "idle",
            PaintStage::Reprojected => "reprojected",
            PaintStage::BoundsClipped => "bounds_clipped",
            PaintStage::ResolutionSelected => "resolution_selected",
            PaintStage::GridComputed => "grid_computed",
            PaintStage::TilesBuilt => "tiles_built",
            PaintStage::Done => "done",
            PaintStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Computes the tiles of one layer for arbitrary viewports.
///
/// Holds only immutable shared state, so one painter can serve any number
/// of concurrent requests.
#[derive(Clone)]
pub struct GridPainter {
    layer: Arc<TileLayer>,
    reprojector: Arc<dyn Reprojector>,
}

impl fmt::Debug for GridPainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridPainter")
            .field("layer", self.layer.id())
            .finish_non_exhaustive()
    }
}

impl GridPainter {
    pub fn new(layer: Arc<TileLayer>, reprojector: Arc<dyn Reprojector>) -> Self {
        Self { layer, reprojector }
    }

    pub fn layer(&self) -> &TileLayer {
        &self.layer
    }

    /// Compute the tiles covering `bounds` (in `target_crs`) at `scale`
    /// pixels per map unit.
    ///
    /// Tiles come column by column: `x` ascending, and `y` ascending within
    /// each column. A viewport outside the layer's max extent yields no
    /// tiles. Any reprojection failure aborts the whole call, and so does a
    /// grid of more than `max_tiles` tiles.
    pub fn paint(&self, target_crs: &str, bounds: &BoundingBox, scale: f64) -> WmsResult<Vec<Tile>> {
        let mut run = PaintRun::new(&self.layer);
        let result = run.execute(self.reprojector.as_ref(), target_crs, bounds, scale);
        match &result {
            Ok(tiles) => {
                run.advance(PaintStage::Done);
                debug!(
                    layer = %self.layer.id(),
                    crs = %target_crs,
                    scale = scale,
                    level = ?run.level,
                    tiles = tiles.len(),
                    "Painted layer"
                );
            }
            Err(e) => {
                debug!(
                    layer = %self.layer.id(),
                    crs = %target_crs,
                    stage = %run.stage,
                    visited = ?run.visited,
                    error = %e,
                    "Paint failed"
                );
                run.advance(PaintStage::Failed);
            }
        }
        result
    }
}

/// State of one `paint` call.
struct PaintRun<'a> {
    layer: &'a TileLayer,
    stage: PaintStage,
    visited: Vec<PaintStage>,
    level: Option<u32>,
}

impl<'a> PaintRun<'a> {
    fn new(layer: &'a TileLayer) -> Self {
        Self {
            layer,
            stage: PaintStage::Idle,
            visited: Vec::new(),
            level: None,
        }
    }

    fn advance(&mut self, stage: PaintStage) {
        trace!(layer = %self.layer.id(), from = %self.stage, to = %stage, "Paint stage");
        self.stage = stage;
        self.visited.push(stage);
    }

    fn execute(
        &mut self,
        reprojector: &dyn Reprojector,
        target_crs: &str,
        bounds: &BoundingBox,
        scale: f64,
    ) -> WmsResult<Vec<Tile>> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(WmsError::InvalidScale(format!(
                "scale must be finite and positive, got {}",
                scale
            )));
        }
        if !bounds.is_valid() {
            return Err(WmsError::InvalidBbox(format!(
                "bounds must be finite with min <= max, got {:?}",
                bounds
            )));
        }
        let target_crs = Crs::from_wms_string(target_crs)?;

        let transformer = BoundsTransformer::between(reprojector, self.layer.crs(), &target_crs)?;

        let (layer_bounds, layer_scale) = match &transformer {
            None => (*bounds, scale),
            Some(transformer) => {
                let layer_bounds = transformer.to_layer(bounds)?;
                let layer_scale = scale_for_layer(bounds, &layer_bounds, scale);
                if !(layer_scale.is_finite() && layer_scale > 0.0) {
                    return Err(WmsError::Reprojection(format!(
                        "bounds {:?} map to degenerate layer bounds {:?}",
                        bounds, layer_bounds
                    )));
                }
                self.advance(PaintStage::Reprojected);
                (layer_bounds, layer_scale)
            }
        };

        let Some(clipped) = layer_bounds.intersection(&self.layer.max_extent().to_bbox()) else {
            trace!(layer = %self.layer.id(), "Bounds outside max extent");
            return Ok(Vec::new());
        };
        self.advance(PaintStage::BoundsClipped);

        let resolution = self.layer.catalog().find_best(layer_scale);
        self.level = Some(resolution.level);
        self.advance(PaintStage::ResolutionSelected);

        let grid = compute_grid(self.layer.max_extent(), &clipped, &resolution, layer_scale);
        if grid.is_empty() {
            warn!(
                layer = %self.layer.id(),
                level = resolution.level,
                scale = layer_scale,
                "Tile size rounds to zero pixels, no tiles produced"
            );
            return Ok(Vec::new());
        }

        let max_tiles = self.layer.config().max_tiles;
        let count = match grid.tile_count() {
            Some(count) if count <= max_tiles => count,
            count => {
                return Err(WmsError::InvalidScale(format!(
                    "scale {} needs {} tiles at level {}, limit is {}",
                    scale,
                    count.map_or_else(|| "too many".to_string(), |c| c.to_string()),
                    resolution.level,
                    max_tiles
                )));
            }
        };
        self.advance(PaintStage::GridComputed);

        let requests = TileRequestBuilder::new(self.layer.config())?;
        let mut tiles = Vec::with_capacity(count);
        for (i, j) in grid.cells() {
            let cell = grid.cell_bounds(i, j);
            let map_bounds = match &transformer {
                Some(transformer) => transformer.to_map(&cell)?,
                None => cell,
            };

            tiles.push(Tile {
                index: TileIndex::new(resolution.level, i, j),
                screen_bounds: screen_bbox(&map_bounds, scale),
                layer_bounds: cell,
                url: requests.build_url(&resolution, &cell),
            });
        }
        self.advance(PaintStage::TilesBuilt);

        Ok(tiles)
    }
}
