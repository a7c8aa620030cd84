//! Conceptual EDM type system

use std::fmt;

/// EDM primitive type kinds
///
/// The subset of the Edm namespace that has a CLR scalar equivalent and can
/// appear in function parameters and result columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTypeKind {
    Binary,
    Boolean,
    Byte,
    DateTime,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    Time,
}

impl PrimitiveTypeKind {
    /// Unqualified type name (e.g. "Int32")
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveTypeKind::Binary => "Binary",
            PrimitiveTypeKind::Boolean => "Boolean",
            PrimitiveTypeKind::Byte => "Byte",
            PrimitiveTypeKind::DateTime => "DateTime",
            PrimitiveTypeKind::DateTimeOffset => "DateTimeOffset",
            PrimitiveTypeKind::Decimal => "Decimal",
            PrimitiveTypeKind::Double => "Double",
            PrimitiveTypeKind::Guid => "Guid",
            PrimitiveTypeKind::Int16 => "Int16",
            PrimitiveTypeKind::Int32 => "Int32",
            PrimitiveTypeKind::Int64 => "Int64",
            PrimitiveTypeKind::SByte => "SByte",
            PrimitiveTypeKind::Single => "Single",
            PrimitiveTypeKind::String => "String",
            PrimitiveTypeKind::Time => "Time",
        }
    }

    /// Namespace-qualified name (e.g. "Edm.Int32")
    pub fn full_name(&self) -> String {
        format!("Edm.{}", self.name())
    }
}

impl fmt::Display for PrimitiveTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved conceptual EDM type
///
/// Produced by resolving a CLR type tag against the conceptual model. Enum
/// variants carry the underlying primitive so store-type resolution never has
/// to go back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdmType {
    Primitive(PrimitiveTypeKind),
    Enum {
        name: String,
        underlying: PrimitiveTypeKind,
    },
    Complex {
        name: String,
    },
    Entity {
        name: String,
    },
}

impl EdmType {
    /// Namespace-qualified name. Primitives live in the Edm namespace, model
    /// types in the conceptual model's namespace.
    pub fn full_name(&self, namespace: &str) -> String {
        match self {
            EdmType::Primitive(kind) => kind.full_name(),
            EdmType::Enum { name, .. }
            | EdmType::Complex { name }
            | EdmType::Entity { name } => format!("{}.{}", namespace, name),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, EdmType::Primitive(_))
    }

    /// The primitive kind backing a scalar-valued type. Enums unwrap to their
    /// underlying primitive; structural types have no scalar backing.
    pub fn scalar_primitive(&self) -> Option<PrimitiveTypeKind> {
        match self {
            EdmType::Primitive(kind) => Some(*kind),
            EdmType::Enum { underlying, .. } => Some(*underlying),
            EdmType::Complex { .. } | EdmType::Entity { .. } => None,
        }
    }
}

/// The declared type of an entity or complex type property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Primitive(PrimitiveTypeKind),
    /// An enum type, by name
    Enum(String),
    /// A complex type, by name
    Complex(String),
}

/// A declared property of an entity or complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmProperty {
    pub name: String,
    pub property_type: PropertyType,
}

impl EdmProperty {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            property_type,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self.property_type, PropertyType::Complex(_))
    }
}

/// A conceptual entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    pub name: String,
    /// Base entity type name, if this type derives from another
    pub base_type: Option<String>,
    /// Declared properties only - inherited properties live on the base type
    pub properties: Vec<EdmProperty>,
}

/// A conceptual complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    pub name: String,
    pub properties: Vec<EdmProperty>,
}

/// A conceptual enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub underlying_type: PrimitiveTypeKind,
}
