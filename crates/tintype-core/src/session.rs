//! Active grading state: the parameter set being edited and whether it still
//! matches a catalog preset.

use std::sync::Arc;

use crate::presets::{CatalogError, ORIGINAL_PRESET_ID, Preset, PresetCatalog};
use crate::transform::params::{ParamField, ParameterSet};

/// Whether the active parameters are bound to a catalog preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetBinding {
    /// Values are an untouched copy of the named preset.
    Preset(String),
    /// At least one field has been edited since the last preset was applied.
    Custom,
}

/// Catalog reference held by a session.
#[derive(Debug, Clone)]
enum CatalogRef {
    Builtin,
    Owned(Arc<PresetCatalog>),
}

/// Session state: one active [`ParameterSet`] plus its [`PresetBinding`].
///
/// Applying a preset copies its parameters; later edits never reach back
/// into the catalog.
#[derive(Debug, Clone)]
pub struct GradeSession {
    catalog: CatalogRef,
    active: ParameterSet,
    binding: PresetBinding,
}

impl Default for GradeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeSession {
    /// Start on the built-in catalog's original preset.
    pub fn new() -> Self {
        Self::start(CatalogRef::Builtin)
    }

    /// Start on the original preset of a custom catalog.
    pub fn with_catalog(catalog: Arc<PresetCatalog>) -> Self {
        Self::start(CatalogRef::Owned(catalog))
    }

    fn start(catalog: CatalogRef) -> Self {
        let mut session = Self {
            catalog,
            active: ParameterSet::default(),
            binding: PresetBinding::Custom,
        };
        session.reset();
        session
    }

    pub fn catalog(&self) -> &PresetCatalog {
        match &self.catalog {
            CatalogRef::Builtin => PresetCatalog::builtin(),
            CatalogRef::Owned(catalog) => catalog.as_ref(),
        }
    }

    /// The parameters to render with.
    pub fn params(&self) -> &ParameterSet {
        &self.active
    }

    pub fn binding(&self) -> &PresetBinding {
        &self.binding
    }

    /// The bound preset, or `None` once the session is custom.
    pub fn active_preset(&self) -> Option<&Preset> {
        match &self.binding {
            PresetBinding::Preset(id) => self.catalog().get(id).ok(),
            PresetBinding::Custom => None,
        }
    }

    /// Display name: the bound preset's name or `"Custom"`.
    pub fn label(&self) -> &str {
        self.active_preset().map_or("Custom", |p| p.name.as_str())
    }

    /// Replace every field with a copy of the preset's parameters.
    ///
    /// Unknown ids leave the session untouched.
    pub fn apply_preset(&mut self, id: &str) -> Result<(), CatalogError> {
        let params = self.catalog().get(id)?.params.clone();
        tracing::debug!(preset = id, "applying preset");
        self.active = params;
        self.binding = PresetBinding::Preset(id.to_string());
        Ok(())
    }

    /// Set exactly one field and mark the session custom.
    ///
    /// The binding flips even when `value` equals the current value.
    pub fn update_field(&mut self, field: ParamField, value: f32) {
        self.active.set(field, value);
        self.binding = PresetBinding::Custom;
    }

    /// Replace the whole parameter set with user-supplied values.
    pub fn replace_params(&mut self, params: ParameterSet) {
        self.active = params;
        self.binding = PresetBinding::Custom;
    }

    /// Return to the original (pass-through) preset.
    pub fn reset(&mut self) {
        let params = self.catalog().original().params.clone();
        self.active = params;
        self.binding = PresetBinding::Preset(ORIGINAL_PRESET_ID.to_string());
    }
}
