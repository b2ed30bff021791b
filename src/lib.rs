//! GeoJSON front end for `roadnet_core`.
//!
//! Road datasets in the wild name their endpoint fields `u`/`v`,
//! `from`/`to` or `source`/`target` and their node ids `osmid` or `id`.
//! This crate maps such collections onto the core input records and
//! re-exports the routing API.

mod fields;
mod geojson_input;
mod sample;

pub use fields::FieldNames;
pub use geojson_input::{edges_from_geojson, load_network, load_network_from_str, nodes_from_geojson};
pub use sample::{mtr_sample_collections, mtr_sample_network, sample_collections, sample_network};

pub use roadnet_core::prelude;
pub use roadnet_core::prelude::*;
