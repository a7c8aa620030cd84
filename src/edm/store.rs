//! Store (database-facing) model representation

use std::fmt;

/// The store half of the two-layer schema. Only the function surface is
/// modeled here; tables and columns are reached through the mapping layer.
#[derive(Debug, Clone, Default)]
pub struct StoreModel {
    pub functions: Vec<StoreFunction>,
}

impl StoreModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, function: StoreFunction) {
        self.functions.push(function);
    }

    pub fn function(&self, name: &str) -> Option<&StoreFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Store-space function metadata
#[derive(Debug, Clone, PartialEq)]
pub struct StoreFunction {
    pub name: String,
    pub namespace_name: String,
    /// Database schema the function lives in (e.g. "dbo")
    pub schema: String,
    pub parameters: Vec<StoreFunctionParameter>,
    /// Empty for stored procedures - result shape is resolved at call time
    pub return_parameters: Vec<StoreReturnParameter>,
    pub is_composable: bool,
    /// Tri-state: `None` means the attribute left it unset, which providers
    /// treat differently from an explicit `false`
    pub is_built_in: Option<bool>,
    pub is_niladic: Option<bool>,
}

/// Parameter passing mode. Return values are modeled as
/// [`StoreReturnParameter`]s, not as a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterMode {
    In,
    InOut,
}

impl fmt::Display for ParameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterMode::In => f.write_str("In"),
            ParameterMode::InOut => f.write_str("InOut"),
        }
    }
}

/// A store function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct StoreFunctionParameter {
    pub name: String,
    pub type_usage: TypeUsage,
    pub mode: ParameterMode,
}

/// A store function return parameter
#[derive(Debug, Clone, PartialEq)]
pub struct StoreReturnParameter {
    pub name: String,
    pub return_type: StoreReturnType,
}

/// Shape of a store function return value
#[derive(Debug, Clone, PartialEq)]
pub enum StoreReturnType {
    /// A single scalar value (scalar user defined functions)
    Scalar(TypeUsage),
    /// A collection of rows (table valued functions)
    RowCollection(RowType),
}

/// A synthetic row type describing a function's result columns
#[derive(Debug, Clone, PartialEq)]
pub struct RowType {
    pub columns: Vec<RowColumn>,
}

/// A single column of a row type
#[derive(Debug, Clone, PartialEq)]
pub struct RowColumn {
    pub name: String,
    pub type_usage: TypeUsage,
}

/// A store type reference with its facets (length, precision, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeUsage {
    /// Store-native type name (e.g. "nvarchar")
    pub store_type: String,
    pub facets: Vec<Facet>,
}

impl TypeUsage {
    /// A type usage with default facets
    pub fn new(store_type: impl Into<String>) -> Self {
        Self {
            store_type: store_type.into(),
            facets: Vec::new(),
        }
    }
}

/// A named facet of a type usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub name: String,
    pub value: String,
}

impl Facet {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
