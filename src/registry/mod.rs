mod loader;

pub use loader::{load, ModelDefinition};

use crate::error::{FacadeError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// One registry row: a stable user-facing identifier mapped to the module
/// path of the model definition, plus display metadata for the client.
///
/// Identifiers are a durable external contract; they never change once
/// published, because persisted datastack files reference them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub identifier: &'static str,
    pub module_path: &'static str,
    pub display_name: &'static str,
}

/// The fixed identifier -> module path table. Constructed once, never
/// mutated; the dotted paths follow the catalog's module layout.
const REGISTRY_TABLE: &[RegistryEntry] = &[
    RegistryEntry {
        identifier: "carbon",
        module_path: "carbon",
        display_name: "Carbon Storage and Sequestration",
    },
    RegistryEntry {
        identifier: "delineateit",
        module_path: "delineateit",
        display_name: "DelineateIt: Watershed Delineation",
    },
    RegistryEntry {
        identifier: "habitat_quality",
        module_path: "habitat_quality",
        display_name: "Habitat Quality",
    },
    RegistryEntry {
        identifier: "habitat_risk_assessment",
        module_path: "hra",
        display_name: "Habitat Risk Assessment",
    },
    RegistryEntry {
        identifier: "pollination",
        module_path: "pollination",
        display_name: "Crop Pollination",
    },
    RegistryEntry {
        identifier: "seasonal_water_yield",
        module_path: "seasonal_water_yield.seasonal_water_yield",
        display_name: "Seasonal Water Yield",
    },
];

fn registry_index() -> &'static HashMap<&'static str, &'static RegistryEntry> {
    static INDEX: OnceLock<HashMap<&'static str, &'static RegistryEntry>> = OnceLock::new();
    INDEX.get_or_init(|| {
        REGISTRY_TABLE
            .iter()
            .map(|entry| (entry.identifier, entry))
            .collect()
    })
}

/// Resolve a model identifier to its registry entry.
///
/// Deterministic, side-effect free, safe to call from concurrent requests.
/// Unknown identifiers fail with [`FacadeError::UnknownModel`]; no load is
/// attempted for them.
pub fn lookup(identifier: &str) -> Result<&'static RegistryEntry> {
    if identifier.trim().is_empty() {
        return Err(FacadeError::UnknownModel(identifier.to_string()));
    }
    registry_index()
        .get(identifier)
        .copied()
        .ok_or_else(|| FacadeError::UnknownModel(identifier.to_string()))
}

/// Entry in the model list returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelListEntry {
    pub identifier: String,
    pub model_name: String,
}

/// Read-only view of the registry, ordered by display name
pub fn model_list() -> Vec<ModelListEntry> {
    let mut entries: Vec<ModelListEntry> = REGISTRY_TABLE
        .iter()
        .map(|entry| ModelListEntry {
            identifier: entry.identifier.to_string(),
            model_name: entry.display_name.to_string(),
        })
        .collect();
    entries.sort_by(|a, b| a.model_name.cmp(&b.model_name));
    debug!("model list contains {} entries", entries.len());
    entries
}

/// All registered entries, in table order
pub fn entries() -> &'static [RegistryEntry] {
    REGISTRY_TABLE
}

/// Resolve an identifier all the way to its argument specification
pub fn argument_spec(identifier: &str) -> Result<crate::spec::ModelSpec> {
    let entry = lookup(identifier)?;
    let definition = load(entry.module_path)?;
    Ok(definition.argument_spec().clone())
}
