//! The complete two-layer model

use super::conceptual::ConceptualModel;
use super::manifest::ProviderManifest;
use super::mapping::DbMapping;
use super::store::StoreModel;

/// The model under construction: conceptual model, store model, the mapping
/// joining them, and the provider type manifest.
///
/// Built and mutated by the host's model-building phase; this crate only adds
/// function metadata to it.
#[derive(Debug, Clone)]
pub struct DbModel {
    pub conceptual_model: ConceptualModel,
    pub store_model: StoreModel,
    pub mapping: DbMapping,
    pub provider_manifest: ProviderManifest,
}

impl DbModel {
    pub fn new(conceptual_model: ConceptualModel, provider_manifest: ProviderManifest) -> Self {
        Self {
            conceptual_model,
            store_model: StoreModel::new(),
            mapping: DbMapping::new(),
            provider_manifest,
        }
    }
}
