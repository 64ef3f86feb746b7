//! Preset catalog: named, immutable parameter sets grouped by category.
//!
//! The built-in table lives in [`builtin`] and is constructed once per
//! process. Alternative tables can be loaded from JSON with the same record
//! shape: `{id, name, category, description, params}`.

mod builtin;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::transform::params::ParameterSet;

/// Identifier of the pass-through preset every catalog must contain.
pub const ORIGINAL_PRESET_ID: &str = "none";

/// Grouping used by preset menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    /// The untouched original.
    Base,
    /// Soft zone-tinted looks.
    Prequel,
    /// Flash / crush looks.
    Royy,
    /// Cinematic and film looks.
    Classic,
}

impl PresetCategory {
    /// Human-readable label for menus.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Prequel => "Prequel",
            Self::Royy => "Royy",
            Self::Classic => "Classic",
        }
    }

    /// All categories in menu order.
    pub fn all() -> &'static [Self] {
        const ALL: [PresetCategory; 4] = [
            PresetCategory::Base,
            PresetCategory::Classic,
            PresetCategory::Prequel,
            PresetCategory::Royy,
        ];
        &ALL
    }
}

/// A complete, named grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub category: PresetCategory,
    pub description: String,
    pub params: ParameterSet,
}

/// Errors from catalog lookup and construction.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("preset not found: {0}")]
    NotFound(String),
    #[error("duplicate preset id: {0}")]
    DuplicateId(String),
    #[error("catalog is missing the \"none\" preset")]
    MissingBasePreset,
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An ordered, immutable list of presets.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Build a catalog, rejecting duplicate ids and a missing original preset.
    pub fn new(presets: Vec<Preset>) -> Result<Self, CatalogError> {
        for (i, preset) in presets.iter().enumerate() {
            if presets[..i].iter().any(|p| p.id == preset.id) {
                return Err(CatalogError::DuplicateId(preset.id.clone()));
            }
        }
        if !presets.iter().any(|p| p.id == ORIGINAL_PRESET_ID) {
            return Err(CatalogError::MissingBasePreset);
        }
        Ok(Self { presets })
    }

    /// The catalog shipped with the crate, built on first use.
    pub fn builtin() -> &'static PresetCatalog {
        static CATALOG: OnceLock<PresetCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let catalog = Self {
                presets: builtin::presets(),
            };
            tracing::debug!(count = catalog.len(), "built-in preset catalog ready");
            catalog
        })
    }

    /// Parse a JSON array of preset records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let presets: Vec<Preset> = serde_json::from_str(json)?;
        Self::new(presets)
    }

    /// Serialize the catalog as a JSON array of preset records.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.presets)?)
    }

    /// Look up a preset by id.
    pub fn get(&self, id: &str) -> Result<&Preset, CatalogError> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// The pass-through preset.
    pub fn original(&self) -> &Preset {
        // `new` and the built-in table both guarantee presence.
        self.presets
            .iter()
            .find(|p| p.id == ORIGINAL_PRESET_ID)
            .unwrap_or_else(|| &self.presets[0])
    }

    /// Presets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Presets of one category, in catalog order.
    pub fn by_category(&self, category: PresetCategory) -> impl Iterator<Item = &Preset> {
        self.presets.iter().filter(move |p| p.category == category)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
