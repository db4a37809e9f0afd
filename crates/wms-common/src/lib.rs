//! Common types shared across the tile grid workspace.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod layer;
pub mod tile;

pub use bbox::{BoundingBox, ScreenBounds};
pub use crs::Crs;
pub use error::{ErrorKind, WmsError, WmsResult};
pub use layer::{LayerConfig, LayerId, LayerParameter, MaxExtent, DEFAULT_MAX_TILES};
pub use tile::{Tile, TileIndex};
