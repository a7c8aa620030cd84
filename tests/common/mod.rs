//! Common test fixtures for store-functions tests

use store_functions::edm::{
    ColumnMapping, ComplexPropertyMapping, ComplexType, ConceptualModel, DbModel, EdmProperty,
    EntitySet, EntitySetMapping, EntityType, EntityTypeMapping, EnumType, Facet, MappingFragment,
    PrimitiveTypeKind, PropertyMapping, PropertyType, ProviderManifest, ScalarPropertyMapping,
    TypeUsage,
};
use store_functions::signature::{
    ClrType, DbFunctionAttribute, MethodClass, MethodSignature, ParameterSignature,
};

/// A model with a small mapped entity hierarchy:
///
/// - entity `Customer` (Id, Name, Address) in entity set `Customers`
/// - entity `PremiumCustomer` deriving from `Customer`, adding `Level`
/// - complex type `Address` (Street, City), flattened into the Customers
///   table
/// - enum type `AddressType` backed by Int32
pub fn sql_server_model() -> DbModel {
    let mut conceptual = ConceptualModel::new("Model", "MyContext");

    conceptual.entity_types.push(EntityType {
        name: "Customer".to_string(),
        base_type: None,
        properties: vec![
            EdmProperty::new("Id", PropertyType::Primitive(PrimitiveTypeKind::Int32)),
            EdmProperty::new("Name", PropertyType::Primitive(PrimitiveTypeKind::String)),
            EdmProperty::new("Address", PropertyType::Complex("Address".to_string())),
        ],
    });
    conceptual.entity_types.push(EntityType {
        name: "PremiumCustomer".to_string(),
        base_type: Some("Customer".to_string()),
        properties: vec![EdmProperty::new(
            "Level",
            PropertyType::Primitive(PrimitiveTypeKind::Int32),
        )],
    });

    conceptual.complex_types.push(ComplexType {
        name: "Address".to_string(),
        properties: vec![
            EdmProperty::new("Street", PropertyType::Primitive(PrimitiveTypeKind::String)),
            EdmProperty::new("City", PropertyType::Primitive(PrimitiveTypeKind::String)),
        ],
    });

    conceptual.enum_types.push(EnumType {
        name: "AddressType".to_string(),
        underlying_type: PrimitiveTypeKind::Int32,
    });

    conceptual.container.entity_sets.push(EntitySet {
        name: "Customers".to_string(),
        element_type: "Customer".to_string(),
    });

    let mut model = DbModel::new(conceptual, ProviderManifest::sql_server());
    model.mapping.entity_set_mappings.push(customers_mapping());
    model
}

fn customers_mapping() -> EntitySetMapping {
    let customer_fragment = MappingFragment {
        store_table: "Customers".to_string(),
        property_mappings: vec![
            scalar_mapping(
                "Id",
                "Id",
                TypeUsage {
                    store_type: "int".to_string(),
                    facets: vec![
                        Facet::new("Nullable", "false"),
                        Facet::new("StoreGeneratedPattern", "Identity"),
                    ],
                },
            ),
            scalar_mapping(
                "Name",
                "Name",
                TypeUsage {
                    store_type: "nvarchar".to_string(),
                    facets: vec![Facet::new("MaxLength", "100")],
                },
            ),
            PropertyMapping::Complex(ComplexPropertyMapping {
                property: "Address".to_string(),
                complex_type: "Address".to_string(),
                property_mappings: vec![
                    scalar_mapping("Street", "Address_Street", TypeUsage::new("nvarchar")),
                    scalar_mapping("City", "Address_City", TypeUsage::new("nvarchar")),
                ],
            }),
        ],
    };

    let premium_fragment = MappingFragment {
        store_table: "Customers".to_string(),
        property_mappings: vec![scalar_mapping("Level", "Level", TypeUsage::new("int"))],
    };

    EntitySetMapping {
        entity_set: "Customers".to_string(),
        entity_type_mappings: vec![
            EntityTypeMapping {
                entity_type: "Customer".to_string(),
                fragments: vec![customer_fragment],
            },
            EntityTypeMapping {
                entity_type: "PremiumCustomer".to_string(),
                fragments: vec![premium_fragment],
            },
        ],
    }
}

fn scalar_mapping(property: &str, column: &str, type_usage: TypeUsage) -> PropertyMapping {
    PropertyMapping::Scalar(ScalarPropertyMapping {
        property: property.to_string(),
        column: ColumnMapping {
            name: column.to_string(),
            type_usage,
        },
    })
}

/// An attributed method with the given parameters and return type
pub fn attributed_method(
    name: &str,
    namespace: &str,
    parameters: Vec<ParameterSignature>,
    return_type: ClrType,
) -> MethodSignature {
    let mut method = MethodSignature::new(name, return_type);
    method.parameters = parameters;
    method.db_function = Some(DbFunctionAttribute::new(namespace, name));
    method
}

/// An attributed table-valued-function shaped method
pub fn tvf_method(
    name: &str,
    parameters: Vec<ParameterSignature>,
    element: ClrType,
) -> MethodSignature {
    attributed_method(name, "Model", parameters, ClrType::queryable(element))
}

pub fn method_class(methods: Vec<MethodSignature>) -> MethodClass {
    MethodClass::new("MyContext", methods)
}
