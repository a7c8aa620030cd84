//! Conceptual (application-facing) model representation

use super::types::{ComplexType, EdmType, EntityType, EnumType};

/// The conceptual half of the two-layer schema: entity, complex and enum
/// types plus the container holding entity sets and function imports.
#[derive(Debug, Clone)]
pub struct ConceptualModel {
    /// Namespace of the model types (e.g. "Model")
    pub namespace_name: String,
    pub container: EntityContainer,
    pub entity_types: Vec<EntityType>,
    pub complex_types: Vec<ComplexType>,
    pub enum_types: Vec<EnumType>,
}

impl ConceptualModel {
    pub fn new(namespace_name: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            container: EntityContainer {
                name: container_name.into(),
                entity_sets: Vec::new(),
                function_imports: Vec::new(),
            },
            entity_types: Vec::new(),
            complex_types: Vec::new(),
            enum_types: Vec::new(),
        }
    }

    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.name == name)
    }

    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|t| t.name == name)
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enum_types.iter().find(|t| t.name == name)
    }
}

/// The conceptual entity container
#[derive(Debug, Clone)]
pub struct EntityContainer {
    pub name: String,
    pub entity_sets: Vec<EntitySet>,
    pub function_imports: Vec<FunctionImport>,
}

impl EntityContainer {
    pub fn add_function_import(&mut self, function_import: FunctionImport) {
        self.function_imports.push(function_import);
    }
}

/// An entity set exposed by the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySet {
    pub name: String,
    /// Name of the entity type stored in this set
    pub element_type: String,
}

/// Conceptual-space function import metadata
///
/// The application-facing counterpart of a store function. Parameters are
/// always mode In; each return parameter describes a collection of the
/// element type, optionally bound to an entity set.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionImport {
    pub name: String,
    /// Namespace of the import - the container name
    pub namespace_name: String,
    pub parameters: Vec<FunctionImportParameter>,
    pub return_parameters: Vec<FunctionImportReturn>,
    /// Entity set bound to each return parameter, parallel to
    /// `return_parameters`; None for non-entity returns
    pub entity_sets: Vec<Option<String>>,
    pub is_composable: bool,
}

/// A function import parameter (always mode In)
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionImportParameter {
    pub name: String,
    pub edm_type: EdmType,
}

/// A function import return parameter - a collection of the element type
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionImportReturn {
    pub name: String,
    pub element_type: EdmType,
}
