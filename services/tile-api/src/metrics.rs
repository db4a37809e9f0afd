//! Request metrics for the tile API.
//!
//! Counters are kept locally and also forwarded to the global `metrics`
//! recorder (Prometheus, when installed).

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;

#[derive(Debug, Default)]
pub struct TileApiMetrics {
    requests: AtomicU64,
    tiles: AtomicU64,
    errors: AtomicU64,
}

impl TileApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tile grid request for `layer`.
    pub fn record_request(&self, layer: &str) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        counter!("tile_api_requests_total", "layer" => layer.to_string()).increment(1);
    }

    /// Record the number of tiles returned for `layer`.
    pub fn record_tiles(&self, layer: &str, count: usize) {
        self.tiles.fetch_add(count as u64, Ordering::Relaxed);
        counter!("tile_api_tiles_total", "layer" => layer.to_string()).increment(count as u64);
    }

    /// Record a failed request by its exception code.
    pub fn record_error(&self, code: &'static str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        counter!("tile_api_errors_total", "code" => code).increment(1);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn tiles(&self) -> u64 {
        self.tiles.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Prometheus text rendering of the local counters.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "# HELP tile_api_requests_total Total tile grid requests\n# TYPE tile_api_requests_total counter\ntile_api_requests_total {}\n",
            self.requests()
        ));
        output.push_str(&format!(
            "# HELP tile_api_tiles_total Total tiles returned\n# TYPE tile_api_tiles_total counter\ntile_api_tiles_total {}\n",
            self.tiles()
        ));
        output.push_str(&format!(
            "# HELP tile_api_errors_total Total failed requests\n# TYPE tile_api_errors_total counter\ntile_api_errors_total {}\n",
            self.errors()
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = TileApiMetrics::new();
        metrics.record_request("osm");
        metrics.record_request("osm");
        metrics.record_tiles("osm", 12);
        metrics.record_error("InvalidBBox");

        assert_eq!(metrics.requests(), 2);
        assert_eq!(metrics.tiles(), 12);
        assert_eq!(metrics.errors(), 1);
        assert!(metrics.render().contains("tile_api_tiles_total 12\n"));
    }
}
