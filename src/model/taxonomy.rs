//! Layer and component taxonomy.

use crate::error::{ErrorContext, Result};
use serde::{Deserialize, Serialize};

/// Bundled standard taxonomy (10 layers, 109 components).
const STANDARD_TAXONOMY_YAML: &str = include_str!("../../data/ea_layers.yaml");

/// A single architectural capability, e.g. "3.2 Data Warehouse".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Stable taxonomy key ("0.1", "3.2", ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// What the component covers
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Component {
    /// Create a component without a description
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// An architectural layer and its ordered components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer number (0-9 in the standard taxonomy)
    pub id: u8,
    /// Display name
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Components in display order
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Layer {
    /// Create a layer from its components
    pub fn new(id: u8, name: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            components,
        }
    }
}

/// Ordered layers, each with an ordered component list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub layers: Vec<Layer>,
}

impl Taxonomy {
    /// Number of layers in the standard taxonomy
    pub const STANDARD_LAYER_COUNT: usize = 10;
    /// Number of components in the standard taxonomy
    pub const STANDARD_COMPONENT_COUNT: usize = 109;

    /// Create a taxonomy from layers
    #[must_use]
    pub const fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// The bundled standard enterprise architecture taxonomy.
    pub fn standard() -> Result<Self> {
        Self::from_yaml_str(STANDARD_TAXONOMY_YAML).context("bundled taxonomy")
    }

    /// Parse a taxonomy from YAML (`layers: [...]`).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Look up a layer by ID
    #[must_use]
    pub fn layer(&self, id: u8) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Look up the layer a component belongs to
    #[must_use]
    pub fn layer_of(&self, component_id: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| l.components.iter().any(|c| c.id == component_id))
    }

    /// Look up a component by ID
    #[must_use]
    pub fn component(&self, component_id: &str) -> Option<&Component> {
        self.components()
            .map(|(_, c)| c)
            .find(|c| c.id == component_id)
    }

    /// Whether a component ID is part of the taxonomy
    #[must_use]
    pub fn contains_component(&self, component_id: &str) -> bool {
        self.component(component_id).is_some()
    }

    /// All components in taxonomy order, paired with their layer
    pub fn components(&self) -> impl Iterator<Item = (&Layer, &Component)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.components.iter().map(move |c| (layer, c)))
    }

    /// Total number of components across all layers
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.layers.iter().map(|l| l.components.len()).sum()
    }

    /// Layer display name, falling back to `Layer {id}`
    #[must_use]
    pub fn layer_name(&self, id: u8) -> String {
        self.layer(id)
            .map_or_else(|| format!("Layer {id}"), |l| l.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_taxonomy_cardinality() {
        let taxonomy = Taxonomy::standard().unwrap();
        assert_eq!(taxonomy.layers.len(), Taxonomy::STANDARD_LAYER_COUNT);
        assert_eq!(
            taxonomy.component_count(),
            Taxonomy::STANDARD_COMPONENT_COUNT
        );
        let ids: Vec<u8> = taxonomy.layers.iter().map(|l| l.id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_standard_component_ids_are_unique() {
        let taxonomy = Taxonomy::standard().unwrap();
        let mut ids: Vec<&str> = taxonomy.components().map(|(_, c)| c.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_lookups() {
        let taxonomy = Taxonomy::new(vec![
            Layer::new(0, "Strategy", vec![Component::new("0.1", "Goals")]),
            Layer::new(3, "Data", vec![Component::new("3.4", "Quality")]),
        ]);
        assert_eq!(taxonomy.layer_of("3.4").map(|l| l.id), Some(3));
        assert_eq!(taxonomy.component("0.1").map(|c| c.name.as_str()), Some("Goals"));
        assert!(!taxonomy.contains_component("9.9"));
        assert_eq!(taxonomy.layer_name(3), "Data");
        assert_eq!(taxonomy.layer_name(7), "Layer 7");
    }
}
