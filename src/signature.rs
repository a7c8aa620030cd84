//! Language-neutral method signature descriptors
//!
//! Discovery does not inspect live reflection objects. The host hands over a
//! plain description of each candidate method - name, parameter list with
//! CLR type tags, return type tag and attribute payloads - which keeps the
//! classifier and validators testable without constructing real methods.

/// A CLR type tag
///
/// Covers exactly the shapes discovery has to distinguish: the scalar types
/// with an EDM equivalent, nullable and enum wrappers, named model types,
/// the queryable-of-T and multi-result-executor return wrappers, and the
/// output-parameter wrapper type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClrType {
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    ByteArray,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Guid,
    Object,
    /// Nullable<T> of a value type
    Nullable(Box<ClrType>),
    /// An enum type, by its type name
    Enum(String),
    /// A class or struct, by its type name - an entity or complex type
    /// candidate
    Named(String),
    /// IQueryable<T> - the composable query shape
    Queryable(Box<ClrType>),
    /// ObjectResult<T> - the multi-result stored procedure executor
    MultiResult(Box<ClrType>),
    /// ObjectParameter - the wrapper for Input/Output and Output database
    /// parameters
    ObjectParameter,
}

impl ClrType {
    /// CLR full name, as it appears in diagnostics
    pub fn full_name(&self) -> String {
        match self {
            ClrType::Boolean => "System.Boolean".to_string(),
            ClrType::Byte => "System.Byte".to_string(),
            ClrType::SByte => "System.SByte".to_string(),
            ClrType::Int16 => "System.Int16".to_string(),
            ClrType::Int32 => "System.Int32".to_string(),
            ClrType::Int64 => "System.Int64".to_string(),
            ClrType::Single => "System.Single".to_string(),
            ClrType::Double => "System.Double".to_string(),
            ClrType::Decimal => "System.Decimal".to_string(),
            ClrType::String => "System.String".to_string(),
            ClrType::ByteArray => "System.Byte[]".to_string(),
            ClrType::DateTime => "System.DateTime".to_string(),
            ClrType::DateTimeOffset => "System.DateTimeOffset".to_string(),
            ClrType::TimeSpan => "System.TimeSpan".to_string(),
            ClrType::Guid => "System.Guid".to_string(),
            ClrType::Object => "System.Object".to_string(),
            ClrType::Nullable(inner) => format!("System.Nullable<{}>", inner.full_name()),
            ClrType::Enum(name) | ClrType::Named(name) => name.clone(),
            ClrType::Queryable(inner) => {
                format!("System.Linq.IQueryable<{}>", inner.full_name())
            }
            ClrType::MultiResult(inner) => format!("ObjectResult<{}>", inner.full_name()),
            ClrType::ObjectParameter => "ObjectParameter".to_string(),
        }
    }

    /// Strips one Nullable<T> wrapper, if present
    pub fn unwrap_nullable(&self) -> &ClrType {
        match self {
            ClrType::Nullable(inner) => inner,
            other => other,
        }
    }

    /// The element type of an IQueryable<T> return shape
    pub fn queryable_element(&self) -> Option<&ClrType> {
        match self {
            ClrType::Queryable(inner) => Some(inner),
            _ => None,
        }
    }

    /// The item type of an ObjectResult<T> return shape
    pub fn multi_result_element(&self) -> Option<&ClrType> {
        match self {
            ClrType::MultiResult(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn queryable(element: ClrType) -> ClrType {
        ClrType::Queryable(Box::new(element))
    }

    pub fn multi_result(item: ClrType) -> ClrType {
        ClrType::MultiResult(Box::new(item))
    }

    pub fn nullable(inner: ClrType) -> ClrType {
        ClrType::Nullable(Box::new(inner))
    }
}

/// CLR parameter passing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterDirection {
    #[default]
    In,
    Out,
    Ref,
}

/// The DbFunction attribute: marks a method as a function candidate and
/// carries the function identity (namespace + store function name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbFunctionAttribute {
    pub namespace_name: String,
    pub function_name: String,
}

impl DbFunctionAttribute {
    pub fn new(namespace_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            function_name: function_name.into(),
        }
    }
}

/// The DbFunctionDetails attribute: optional store-side details.
///
/// The boolean flags are tri-state - `None` means the flag was not set on
/// the attribute, which is different from an explicit `false` when the store
/// function is synthesized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DbFunctionDetailsAttribute {
    pub database_schema: Option<String>,
    pub result_column_name: Option<String>,
    /// Result item types of a stored procedure returning multiple result
    /// sets; invalid on any other function kind
    pub result_types: Option<Vec<ClrType>>,
    pub is_built_in: Option<bool>,
    pub is_niladic: Option<bool>,
}

/// The ParameterType attribute: declares the logical type (and optionally an
/// explicit store type name) of an ObjectParameter-typed parameter, whose
/// static type carries no usable type information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTypeAttribute {
    pub clr_type: ClrType,
    pub store_type: Option<String>,
}

impl ParameterTypeAttribute {
    pub fn new(clr_type: ClrType) -> Self {
        Self {
            clr_type,
            store_type: None,
        }
    }

    pub fn with_store_type(clr_type: ClrType, store_type: impl Into<String>) -> Self {
        Self {
            clr_type,
            store_type: Some(store_type.into()),
        }
    }
}

/// One method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSignature {
    pub name: String,
    pub clr_type: ClrType,
    pub direction: ParameterDirection,
    pub parameter_type: Option<ParameterTypeAttribute>,
}

impl ParameterSignature {
    pub fn new(name: impl Into<String>, clr_type: ClrType) -> Self {
        Self {
            name: name.into(),
            clr_type,
            direction: ParameterDirection::In,
            parameter_type: None,
        }
    }
}

/// A candidate method, as the host's declarative metadata describes it
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<ParameterSignature>,
    pub return_type: ClrType,
    /// Extension methods carry their receiver as the first parameter, which
    /// is not a function argument
    pub is_extension: bool,
    pub db_function: Option<DbFunctionAttribute>,
    pub details: Option<DbFunctionDetailsAttribute>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, return_type: ClrType) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            is_extension: false,
            db_function: None,
            details: None,
        }
    }
}

/// The class holding candidate function methods
///
/// Only the methods listed here are scanned - the declared-only binding
/// policy of the host's reflection pass is applied before this descriptor is
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodClass {
    pub name: String,
    pub methods: Vec<MethodSignature>,
}

impl MethodClass {
    pub fn new(name: impl Into<String>, methods: Vec<MethodSignature>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }
}
