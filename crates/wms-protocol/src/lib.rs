//! OGC WMS client-side protocol helpers.
//!
//! Supports composing GetMap requests for WMS 1.1.1 and WMS 1.3.0 servers.

pub mod decimal;
pub mod getmap;

pub use decimal::format_decimal;
pub use getmap::{crs_parameter_name, GetMapUrl, WMS_1_3_0};
