//! Provider type manifest
//!
//! The provider-specific catalog of store-native types. The builder consults
//! it for two things only: resolving a conceptual primitive to its default
//! store type, and looking up an explicitly requested store type by name.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::store::TypeUsage;
use super::types::PrimitiveTypeKind;

/// A store-native type exposed by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreType {
    /// Store type name (e.g. "nvarchar")
    pub name: String,
    /// The EDM primitive the store type surfaces as
    pub primitive: PrimitiveTypeKind,
}

impl StoreType {
    pub fn new(name: impl Into<String>, primitive: PrimitiveTypeKind) -> Self {
        Self {
            name: name.into(),
            primitive,
        }
    }
}

/// Provider type manifest: the available store types plus the default
/// primitive-to-store-type mapping.
#[derive(Debug, Clone)]
pub struct ProviderManifest {
    store_types: Vec<StoreType>,
    default_types: HashMap<PrimitiveTypeKind, String>,
}

impl ProviderManifest {
    pub fn new(
        store_types: Vec<StoreType>,
        default_types: HashMap<PrimitiveTypeKind, String>,
    ) -> Self {
        Self {
            store_types,
            default_types,
        }
    }

    /// All store types the provider knows about
    pub fn store_types(&self) -> &[StoreType] {
        &self.store_types
    }

    /// Exact-name lookup of a store type
    pub fn find_store_type(&self, name: &str) -> Option<&StoreType> {
        self.store_types.iter().find(|t| t.name == name)
    }

    /// Default store type usage for a conceptual primitive.
    ///
    /// Every primitive kind must have a default mapping; a missing entry is a
    /// defect in the manifest, not a user error.
    pub fn default_store_type(&self, kind: PrimitiveTypeKind) -> TypeUsage {
        let name = self
            .default_types
            .get(&kind)
            .unwrap_or_else(|| panic!("provider manifest has no store type for Edm.{}", kind));
        TypeUsage::new(name.clone())
    }

    /// The SQL Server manifest used by the tests and the default provider.
    pub fn sql_server() -> Self {
        Self::new(
            SQL_SERVER_STORE_TYPES.clone(),
            SQL_SERVER_DEFAULT_TYPES.clone(),
        )
    }
}

/// SQL Server store types (2012 manifest surface)
static SQL_SERVER_STORE_TYPES: Lazy<Vec<StoreType>> = Lazy::new(|| {
    vec![
        StoreType::new("bigint", PrimitiveTypeKind::Int64),
        StoreType::new("binary", PrimitiveTypeKind::Binary),
        StoreType::new("bit", PrimitiveTypeKind::Boolean),
        StoreType::new("char", PrimitiveTypeKind::String),
        StoreType::new("date", PrimitiveTypeKind::DateTime),
        StoreType::new("datetime", PrimitiveTypeKind::DateTime),
        StoreType::new("datetime2", PrimitiveTypeKind::DateTime),
        StoreType::new("datetimeoffset", PrimitiveTypeKind::DateTimeOffset),
        StoreType::new("decimal", PrimitiveTypeKind::Decimal),
        StoreType::new("float", PrimitiveTypeKind::Double),
        StoreType::new("image", PrimitiveTypeKind::Binary),
        StoreType::new("int", PrimitiveTypeKind::Int32),
        StoreType::new("money", PrimitiveTypeKind::Decimal),
        StoreType::new("nchar", PrimitiveTypeKind::String),
        StoreType::new("ntext", PrimitiveTypeKind::String),
        StoreType::new("numeric", PrimitiveTypeKind::Decimal),
        StoreType::new("nvarchar", PrimitiveTypeKind::String),
        StoreType::new("real", PrimitiveTypeKind::Single),
        StoreType::new("smalldatetime", PrimitiveTypeKind::DateTime),
        StoreType::new("smallint", PrimitiveTypeKind::Int16),
        StoreType::new("smallmoney", PrimitiveTypeKind::Decimal),
        StoreType::new("text", PrimitiveTypeKind::String),
        StoreType::new("time", PrimitiveTypeKind::Time),
        StoreType::new("timestamp", PrimitiveTypeKind::Binary),
        StoreType::new("tinyint", PrimitiveTypeKind::Byte),
        StoreType::new("uniqueidentifier", PrimitiveTypeKind::Guid),
        StoreType::new("varbinary", PrimitiveTypeKind::Binary),
        StoreType::new("varchar", PrimitiveTypeKind::String),
        StoreType::new("xml", PrimitiveTypeKind::String),
    ]
});

/// Default primitive-to-store-type choices for SQL Server
static SQL_SERVER_DEFAULT_TYPES: Lazy<HashMap<PrimitiveTypeKind, String>> = Lazy::new(|| {
    [
        (PrimitiveTypeKind::Binary, "varbinary"),
        (PrimitiveTypeKind::Boolean, "bit"),
        (PrimitiveTypeKind::Byte, "tinyint"),
        (PrimitiveTypeKind::DateTime, "datetime2"),
        (PrimitiveTypeKind::DateTimeOffset, "datetimeoffset"),
        (PrimitiveTypeKind::Decimal, "decimal"),
        (PrimitiveTypeKind::Double, "float"),
        (PrimitiveTypeKind::Guid, "uniqueidentifier"),
        (PrimitiveTypeKind::Int16, "smallint"),
        (PrimitiveTypeKind::Int32, "int"),
        (PrimitiveTypeKind::Int64, "bigint"),
        (PrimitiveTypeKind::SByte, "smallint"),
        (PrimitiveTypeKind::Single, "real"),
        (PrimitiveTypeKind::String, "nvarchar"),
        (PrimitiveTypeKind::Time, "time"),
    ]
    .into_iter()
    .map(|(kind, name)| (kind, name.to_string()))
    .collect()
});
