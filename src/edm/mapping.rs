//! Conceptual-to-store mapping layer

use super::store::TypeUsage;

/// The mapping joining the conceptual and store models
#[derive(Debug, Clone, Default)]
pub struct DbMapping {
    pub entity_set_mappings: Vec<EntitySetMapping>,
    pub function_import_mappings: Vec<FunctionImportMapping>,
}

impl DbMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function_import_mapping(&mut self, mapping: FunctionImportMapping) {
        self.function_import_mappings.push(mapping);
    }
}

/// Mapping of one entity set to its store tables
#[derive(Debug, Clone)]
pub struct EntitySetMapping {
    pub entity_set: String,
    pub entity_type_mappings: Vec<EntityTypeMapping>,
}

/// Mapping of one entity type within an entity set mapping
#[derive(Debug, Clone)]
pub struct EntityTypeMapping {
    pub entity_type: String,
    pub fragments: Vec<MappingFragment>,
}

/// One table fragment of an entity type mapping
#[derive(Debug, Clone)]
pub struct MappingFragment {
    pub store_table: String,
    pub property_mappings: Vec<PropertyMapping>,
}

/// Mapping of a conceptual property to store columns
#[derive(Debug, Clone)]
pub enum PropertyMapping {
    Scalar(ScalarPropertyMapping),
    Complex(ComplexPropertyMapping),
}

impl PropertyMapping {
    /// Name of the conceptual property this mapping covers
    pub fn property(&self) -> &str {
        match self {
            PropertyMapping::Scalar(m) => &m.property,
            PropertyMapping::Complex(m) => &m.property,
        }
    }
}

/// A scalar property mapped to a single store column
#[derive(Debug, Clone)]
pub struct ScalarPropertyMapping {
    pub property: String,
    pub column: ColumnMapping,
}

/// The store column side of a scalar property mapping
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub name: String,
    pub type_usage: TypeUsage,
}

/// A complex-typed property mapped through its members
///
/// Member mappings may only be scalar - a complex member here means a nested
/// complex type, which is not supported.
#[derive(Debug, Clone)]
pub struct ComplexPropertyMapping {
    pub property: String,
    pub complex_type: String,
    pub property_mappings: Vec<PropertyMapping>,
}

/// Mapping of a function import to its store function
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionImportMapping {
    /// A composable mapping (TVFs, scalar UDFs) carrying a single result
    /// mapping
    Composable {
        function_import: String,
        store_function: String,
        result_mapping: FunctionImportResultMapping,
    },
    /// A non-composable mapping (stored procedures) with an empty result
    /// mapping list - result shapes are resolved when the procedure runs
    NonComposable {
        function_import: String,
        store_function: String,
        result_mappings: Vec<FunctionImportResultMapping>,
    },
}

/// Result shape mapping of a function import
///
/// Empty at registration time; shape resolution happens dynamically at call
/// time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionImportResultMapping {}

impl FunctionImportResultMapping {
    pub fn new() -> Self {
        Self::default()
    }
}
