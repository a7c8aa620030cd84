//! Function and parameter descriptors
//!
//! Immutable value objects produced by discovery and consumed by the store
//! function builder and the convention. Created fresh on every model-build
//! pass and discarded once the metadata is registered.

use crate::edm::EdmType;

/// The store-side kind of a discovered function
///
/// Derived once, during discovery, from the method's declared return shape
/// and the presence of the DbFunction attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFunctionKind {
    StoredProcedure,
    TableValuedFunction,
    ScalarUserDefinedFunction,
}

/// Canonical description of one discovered function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    name: String,
    parameters: Vec<ParameterDescriptor>,
    return_types: Vec<EdmType>,
    result_column_name: Option<String>,
    database_schema: Option<String>,
    store_function_kind: StoreFunctionKind,
    is_built_in: Option<bool>,
    is_niladic: Option<bool>,
}

impl FunctionDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
        return_types: Vec<EdmType>,
        result_column_name: Option<String>,
        database_schema: Option<String>,
        store_function_kind: StoreFunctionKind,
        is_built_in: Option<bool>,
        is_niladic: Option<bool>,
    ) -> Self {
        let name = name.into();
        debug_assert!(!name.trim().is_empty(), "invalid name");
        debug_assert!(!return_types.is_empty(), "return_types is empty");
        debug_assert!(
            store_function_kind == StoreFunctionKind::StoredProcedure || return_types.len() == 1,
            "multiple return types for non-sproc"
        );

        Self {
            name,
            parameters,
            return_types,
            result_column_name,
            database_schema,
            store_function_kind,
            is_built_in,
            is_niladic,
        }
    }

    /// The store-side function name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Conceptual return types. Exactly one element unless the function is a
    /// stored procedure returning multiple result sets.
    pub fn return_types(&self) -> &[EdmType] {
        &self.return_types
    }

    /// Name of the single synthesized column for bare scalar and enum
    /// returns
    pub fn result_column_name(&self) -> Option<&str> {
        self.result_column_name.as_deref()
    }

    /// Per-function override of the convention-wide default schema
    pub fn database_schema(&self) -> Option<&str> {
        self.database_schema.as_deref()
    }

    pub fn store_function_kind(&self) -> StoreFunctionKind {
        self.store_function_kind
    }

    /// Whether the store function is a provider built-in. `None` means the
    /// attribute did not say, which is not the same as an explicit `false`.
    pub fn is_built_in(&self) -> Option<bool> {
        self.is_built_in
    }

    /// Whether a built-in is invoked without parentheses. Tri-state, like
    /// `is_built_in`.
    pub fn is_niladic(&self) -> Option<bool> {
        self.is_niladic
    }
}

/// Canonical description of one function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    name: String,
    edm_type: EdmType,
    store_type: Option<String>,
    is_out_param: bool,
}

impl ParameterDescriptor {
    pub fn new(
        name: impl Into<String>,
        edm_type: EdmType,
        store_type: Option<String>,
        is_out_param: bool,
    ) -> Self {
        Self {
            name: name.into(),
            edm_type,
            store_type,
            is_out_param,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved conceptual type - always a scalar (primitive or enum)
    pub fn edm_type(&self) -> &EdmType {
        &self.edm_type
    }

    /// Explicit store type name override, if the ParameterType attribute
    /// supplied one
    pub fn store_type(&self) -> Option<&str> {
        self.store_type.as_deref()
    }

    pub fn is_out_param(&self) -> bool {
        self.is_out_param
    }
}
