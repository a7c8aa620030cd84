//! Type resolution across the three type systems
//!
//! Three explicit resolution steps, composed in a fixed order and never
//! merged: CLR tag to conceptual EDM type, conceptual primitive to store
//! type, and explicit store-type-name to store type. Keeping them separate
//! lets each be exercised against synthetic models on its own.

use crate::edm::{ConceptualModel, EdmType, PrimitiveTypeKind, ProviderManifest, TypeUsage};
use crate::error::StoreFunctionsError;
use crate::signature::ClrType;

/// Maps a CLR scalar tag to its EDM primitive equivalent. No unwrapping -
/// callers strip Nullable<T> first.
pub fn clr_to_primitive(clr_type: &ClrType) -> Option<PrimitiveTypeKind> {
    match clr_type {
        ClrType::Boolean => Some(PrimitiveTypeKind::Boolean),
        ClrType::Byte => Some(PrimitiveTypeKind::Byte),
        ClrType::SByte => Some(PrimitiveTypeKind::SByte),
        ClrType::Int16 => Some(PrimitiveTypeKind::Int16),
        ClrType::Int32 => Some(PrimitiveTypeKind::Int32),
        ClrType::Int64 => Some(PrimitiveTypeKind::Int64),
        ClrType::Single => Some(PrimitiveTypeKind::Single),
        ClrType::Double => Some(PrimitiveTypeKind::Double),
        ClrType::Decimal => Some(PrimitiveTypeKind::Decimal),
        ClrType::String => Some(PrimitiveTypeKind::String),
        ClrType::ByteArray => Some(PrimitiveTypeKind::Binary),
        ClrType::DateTime => Some(PrimitiveTypeKind::DateTime),
        ClrType::DateTimeOffset => Some(PrimitiveTypeKind::DateTimeOffset),
        ClrType::TimeSpan => Some(PrimitiveTypeKind::Time),
        ClrType::Guid => Some(PrimitiveTypeKind::Guid),
        _ => None,
    }
}

/// Resolves a parameter's CLR type to a conceptual scalar type: nullable
/// unwrap, then enum lookup by name, then primitive mapping. Structural
/// types are not valid parameter types.
pub fn resolve_parameter_type(model: &ConceptualModel, clr_type: &ClrType) -> Option<EdmType> {
    let unwrapped = clr_type.unwrap_nullable();

    if let ClrType::Enum(name) = unwrapped {
        return model.enum_type(name).map(|e| EdmType::Enum {
            name: e.name.clone(),
            underlying: e.underlying_type,
        });
    }

    clr_to_primitive(unwrapped).map(EdmType::Primitive)
}

/// Resolves a return item's CLR type to a conceptual type: primitive first,
/// then enum by name, then structural (entity types, then complex types).
pub fn resolve_return_item_type(
    model: &ConceptualModel,
    clr_type: &ClrType,
) -> Result<EdmType, StoreFunctionsError> {
    let unwrapped = clr_type.unwrap_nullable();

    if let Some(kind) = clr_to_primitive(unwrapped) {
        return Ok(EdmType::Primitive(kind));
    }

    match unwrapped {
        ClrType::Enum(name) => {
            if let Some(enum_type) = model.enum_type(name) {
                return Ok(EdmType::Enum {
                    name: enum_type.name.clone(),
                    underlying: enum_type.underlying_type,
                });
            }
        }
        ClrType::Named(name) => {
            if let Some(edm_type) = find_structural_type(model, name) {
                return Ok(edm_type);
            }
        }
        _ => {}
    }

    Err(StoreFunctionsError::UnresolvableType {
        type_name: clr_type.full_name(),
    })
}

/// By-name lookup across the conceptual structural types, entity types
/// first.
pub fn find_structural_type(model: &ConceptualModel, name: &str) -> Option<EdmType> {
    if model.entity_type(name).is_some() {
        return Some(EdmType::Entity {
            name: name.to_string(),
        });
    }
    if model.complex_type(name).is_some() {
        return Some(EdmType::Complex {
            name: name.to_string(),
        });
    }
    None
}

/// Conceptual primitive to store-native type, via the provider manifest.
pub fn store_type_for_primitive(
    manifest: &ProviderManifest,
    kind: PrimitiveTypeKind,
) -> TypeUsage {
    manifest.default_store_type(kind)
}

/// Exact-name store type lookup for explicit overrides.
pub fn find_store_type_by_name(
    manifest: &ProviderManifest,
    name: &str,
) -> Result<TypeUsage, StoreFunctionsError> {
    manifest
        .find_store_type(name)
        .map(|t| TypeUsage::new(t.name.clone()))
        .ok_or_else(|| StoreFunctionsError::StoreTypeNotFound {
            store_type: name.to_string(),
        })
}
