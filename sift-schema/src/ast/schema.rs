//! Top-level schema definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::Model;
use crate::error::{SchemaError, SchemaResult};

/// A complete Sift schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// All models in the schema.
    pub models: IndexMap<SmolStr, Model>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model to the schema.
    pub fn add_model(&mut self, model: Model) {
        self.models.insert(model.name.name.clone(), model);
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Get a model by name, failing with [`SchemaError::UnknownModel`].
    pub fn model(&self, name: &str) -> SchemaResult<&Model> {
        self.get_model(name)
            .ok_or_else(|| SchemaError::UnknownModel { name: name.to_string() })
    }

    /// Find the model backing a database table.
    pub fn table(&self, table: &str) -> SchemaResult<&Model> {
        self.models
            .values()
            .find(|m| m.table_name() == table)
            .ok_or_else(|| SchemaError::UnknownModel { name: table.to_string() })
    }

    /// Get all model names.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|k| k.as_str())
    }
}
