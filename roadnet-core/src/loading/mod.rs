//! This module is responsible for turning node and edge records into
//! a routable road network.

mod builder;
pub(crate) mod de;

pub use builder::build_network;
pub use de::id_from_json;
