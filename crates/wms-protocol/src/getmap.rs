//! GetMap request URL composition.
//!
//! The parameter order and spelling are fixed so that the same tile always
//! produces the same URL, byte for byte. Values are written as configured,
//! without percent-encoding.

use std::fmt::Write;

use wms_common::{BoundingBox, LayerConfig, WmsError, WmsResult};

use crate::format_decimal;

/// Version string that switches the CRS parameter from `srs` to `crs`.
pub const WMS_1_3_0: &str = "1.3.0";

/// Name of the CRS parameter for a WMS version.
pub fn crs_parameter_name(version: &str) -> &'static str {
    if version == WMS_1_3_0 {
        "crs"
    } else {
        "srs"
    }
}

/// Builds GetMap URLs for one layer.
#[derive(Debug, Clone, Copy)]
pub struct GetMapUrl<'a> {
    config: &'a LayerConfig,
    base_url: &'a str,
}

impl<'a> GetMapUrl<'a> {
    /// Fails when the layer has no base URL.
    pub fn new(config: &'a LayerConfig) -> WmsResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| WmsError::MissingParameter("base_url".to_string()))?;

        Ok(Self { config, base_url })
    }

    /// Compose the GetMap URL for an image of `width` x `height` pixels
    /// covering `bbox` in the layer's native CRS.
    pub fn build(&self, width: u32, height: u32, bbox: &BoundingBox) -> String {
        let config = self.config;
        let mut url = String::with_capacity(self.base_url.len() + 256);

        url.push_str(self.base_url);
        url.push(if self.base_url.contains('?') { '&' } else { '?' });
        url.push_str("SERVICE=WMS");
        url.push_str("&request=GetMap");

        // Writing into a String cannot fail.
        let _ = write!(url, "&layers={}", config.upstream_layer_name());
        let _ = write!(url, "&WIDTH={}", width);
        let _ = write!(url, "&HEIGHT={}", height);
        let _ = write!(
            url,
            "&bbox={},{},{},{}",
            format_decimal(bbox.min_x),
            format_decimal(bbox.min_y),
            format_decimal(bbox.max_x),
            format_decimal(bbox.max_y)
        );
        let _ = write!(url, "&format={}", config.format);
        let _ = write!(url, "&version={}", config.version);
        let _ = write!(
            url,
            "&{}={}",
            crs_parameter_name(&config.version),
            config.crs
        );
        let _ = write!(url, "&styles={}", config.styles);

        for parameter in &config.parameters {
            let _ = write!(url, "&{}={}", parameter.name, parameter.value);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_common::{Crs, LayerParameter};

    fn layer(version: &str) -> LayerConfig {
        let mut config = LayerConfig::new("bluemarble", Crs::from_wms_string("EPSG:4326").unwrap());
        config.base_url = Some("http://example.com/wms".to_string());
        config.version = version.to_string();
        config
    }

    #[test]
    fn test_crs_parameter_by_version() {
        assert_eq!(crs_parameter_name("1.3.0"), "crs");
        assert_eq!(crs_parameter_name("1.1.1"), "srs");
        assert_eq!(crs_parameter_name("1.1.0"), "srs");
    }

    #[test]
    fn test_full_url() {
        let config = layer("1.1.1");
        let url = GetMapUrl::new(&config)
            .unwrap()
            .build(256, 256, &BoundingBox::new(-180.0, -90.0, 0.0, 90.0));
        assert_eq!(
            url,
            "http://example.com/wms?SERVICE=WMS&request=GetMap&layers=bluemarble\
             &WIDTH=256&HEIGHT=256&bbox=-180,-90,0,90&format=image/png\
             &version=1.1.1&srs=EPSG:4326&styles="
        );
    }

    #[test]
    fn test_existing_query_string() {
        let mut config = layer("1.1.1");
        config.base_url = Some("http://example.com/wms?map=world".to_string());
        let url = GetMapUrl::new(&config)
            .unwrap()
            .build(256, 256, &BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert!(url.starts_with("http://example.com/wms?map=world&SERVICE=WMS&request=GetMap"));
    }

    #[test]
    fn test_extra_parameters_in_order() {
        let mut config = layer("1.3.0");
        config.data_source_name = Some("nasa:bluemarble".to_string());
        config.parameters = vec![
            LayerParameter::new("transparent", "true"),
            LayerParameter::new("TIME", "2024-01-01"),
        ];
        let url = GetMapUrl::new(&config)
            .unwrap()
            .build(512, 256, &BoundingBox::new(0.5, 0.25, 1.5, 0.75));
        assert!(url.contains("&layers=nasa:bluemarble&"));
        assert!(url.contains("&WIDTH=512&HEIGHT=256&"));
        assert!(url.contains("&bbox=0.5,0.25,1.5,0.75&"));
        assert!(url.ends_with("&crs=EPSG:4326&styles=&transparent=true&TIME=2024-01-01"));
    }

    #[test]
    fn test_missing_base_url() {
        let mut config = layer("1.1.1");
        config.base_url = None;
        assert!(matches!(
            GetMapUrl::new(&config),
            Err(WmsError::MissingParameter(_))
        ));

        config.base_url = Some("   ".to_string());
        assert!(matches!(
            GetMapUrl::new(&config),
            Err(WmsError::MissingParameter(_))
        ));
    }
}
