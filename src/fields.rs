use serde::Deserialize;

/// Property names the GeoJSON adapter looks up, first match wins
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Node id properties, the feature `id` is tried after these
    pub node_id: Vec<String>,
    /// Edge source node id properties
    pub source: Vec<String>,
    /// Edge target node id properties
    pub target: Vec<String>,
    /// One-way flag property
    pub oneway: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        let names = |list: &[&str]| -> Vec<String> { list.iter().map(ToString::to_string).collect() };
        Self {
            node_id: names(&["osmid", "id"]),
            source: names(&["u", "from", "source"]),
            target: names(&["v", "to", "target"]),
            oneway: "oneway".to_string(),
        }
    }
}

impl FieldNames {
    /// Whether a property is consumed as an id or flag rather than an
    /// edge attribute
    pub(crate) fn is_edge_key_field(&self, name: &str) -> bool {
        name == self.oneway || self.source.iter().chain(&self.target).any(|field| field == name)
    }

    /// Whether a property is consumed as a node id rather than a node
    /// attribute
    pub(crate) fn is_node_id_field(&self, name: &str) -> bool {
        self.node_id.iter().any(|field| field == name)
    }
}
