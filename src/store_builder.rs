//! Store function synthesis
//!
//! Turns function descriptors into store-side function metadata. Return
//! shapes differ per kind: table valued functions return a collection of a
//! synthesized row type, scalar user defined functions return a bare store
//! primitive, and stored procedures declare no store-side return at all.
//!
//! Entity row columns take their store types from the entity's mapping
//! fragments so the function result matches the table columns exactly.
//! Complex and scalar returns fall back to the provider manifest defaults.

use std::collections::HashMap;

use crate::descriptor::{FunctionDescriptor, ParameterDescriptor, StoreFunctionKind};
use crate::edm::{
    ComplexPropertyMapping, DbModel, EdmProperty, EdmType, EntityType, ParameterMode,
    PropertyMapping, PropertyType, RowColumn, RowType, StoreFunction, StoreFunctionParameter,
    StoreReturnParameter, StoreReturnType, TypeUsage,
};
use crate::error::StoreFunctionsError;
use crate::resolve;
use crate::tools;
use crate::CODE_FIRST_DATABASE_SCHEMA;

// Store-generation facets describe table column behavior and make no sense
// on a function result column.
const STRIPPED_FACETS: [&str; 2] = ["StoreGeneratedPattern", "ConcurrencyMode"];

/// Builds store function metadata from function descriptors
pub struct StoreFunctionBuilder<'a> {
    model: &'a DbModel,
    schema: Option<String>,
    namespace_name: String,
}

impl<'a> StoreFunctionBuilder<'a> {
    pub fn new(model: &'a DbModel, schema: Option<&str>) -> Self {
        Self {
            model,
            schema: schema.map(str::to_string),
            // The namespace code-first model builders use for store items.
            namespace_name: CODE_FIRST_DATABASE_SCHEMA.to_string(),
        }
    }

    pub fn create(
        &self,
        descriptor: &FunctionDescriptor,
    ) -> Result<StoreFunction, StoreFunctionsError> {
        let schema = descriptor
            .database_schema()
            .or(self.schema.as_deref())
            .ok_or_else(|| StoreFunctionsError::MissingSchema {
                function: descriptor.name().to_string(),
            })?;

        let parameters = descriptor
            .parameters()
            .iter()
            .map(|p| self.create_parameter(p))
            .collect::<Result<Vec<_>, _>>()?;

        let return_parameters = self.create_return_parameters(descriptor)?;

        Ok(StoreFunction {
            name: descriptor.name().to_string(),
            namespace_name: self.namespace_name.clone(),
            schema: schema.to_string(),
            parameters,
            return_parameters,
            is_composable: descriptor.store_function_kind() != StoreFunctionKind::StoredProcedure,
            is_built_in: descriptor.is_built_in(),
            is_niladic: descriptor.is_niladic(),
        })
    }

    fn create_parameter(
        &self,
        parameter: &ParameterDescriptor,
    ) -> Result<StoreFunctionParameter, StoreFunctionsError> {
        let type_usage = if let Some(store_type) = parameter.store_type() {
            resolve::find_store_type_by_name(&self.model.provider_manifest, store_type)?
        } else {
            let primitive = parameter.edm_type().scalar_primitive().unwrap_or_else(|| {
                panic!("parameter type '{:?}' is not scalar", parameter.edm_type())
            });
            resolve::store_type_for_primitive(&self.model.provider_manifest, primitive)
        };

        Ok(StoreFunctionParameter {
            name: parameter.name().to_string(),
            type_usage,
            mode: if parameter.is_out_param() {
                ParameterMode::InOut
            } else {
                ParameterMode::In
            },
        })
    }

    fn create_return_parameters(
        &self,
        descriptor: &FunctionDescriptor,
    ) -> Result<Vec<StoreReturnParameter>, StoreFunctionsError> {
        let return_type = match descriptor.store_function_kind() {
            StoreFunctionKind::TableValuedFunction => {
                let row_type = self.create_return_row_type(
                    descriptor.result_column_name(),
                    &descriptor.return_types()[0],
                    descriptor.name(),
                )?;
                StoreReturnType::RowCollection(row_type)
            }
            StoreFunctionKind::ScalarUserDefinedFunction => {
                let return_type = &descriptor.return_types()[0];
                let primitive = return_type.scalar_primitive().unwrap_or_else(|| {
                    panic!("scalar function return type '{return_type:?}' is not scalar")
                });
                StoreReturnType::Scalar(resolve::store_type_for_primitive(
                    &self.model.provider_manifest,
                    primitive,
                ))
            }
            // Stored procedure results are shaped by the reader, not by
            // store metadata.
            StoreFunctionKind::StoredProcedure => return Ok(Vec::new()),
        };

        Ok(vec![StoreReturnParameter {
            name: "ReturnParam".to_string(),
            return_type,
        }])
    }

    fn create_return_row_type(
        &self,
        result_column_name: Option<&str>,
        edm_type: &EdmType,
        function: &str,
    ) -> Result<RowType, StoreFunctionsError> {
        match edm_type {
            EdmType::Entity { name } => {
                let entity_type = self
                    .model
                    .conceptual_model
                    .entity_type(name)
                    .unwrap_or_else(|| {
                        panic!("entity type '{name}' is not in the conceptual model")
                    });
                self.create_entity_row_type(entity_type)
            }
            EdmType::Complex { name } => {
                let complex_type = self
                    .model
                    .conceptual_model
                    .complex_type(name)
                    .unwrap_or_else(|| {
                        panic!("complex type '{name}' is not in the conceptual model")
                    });

                let mut columns = Vec::with_capacity(complex_type.properties.len());
                for property in &complex_type.properties {
                    columns.push(RowColumn {
                        name: property.name.clone(),
                        type_usage: self.default_property_store_type(property)?,
                    });
                }
                Ok(RowType { columns })
            }
            EdmType::Enum { underlying, .. } => {
                let column_name = self.require_result_column_name(result_column_name, function)?;
                Ok(RowType {
                    columns: vec![RowColumn {
                        name: column_name,
                        type_usage: resolve::store_type_for_primitive(
                            &self.model.provider_manifest,
                            *underlying,
                        ),
                    }],
                })
            }
            EdmType::Primitive(kind) => {
                let column_name = self.require_result_column_name(result_column_name, function)?;
                Ok(RowType {
                    columns: vec![RowColumn {
                        name: column_name,
                        type_usage: resolve::store_type_for_primitive(
                            &self.model.provider_manifest,
                            *kind,
                        ),
                    }],
                })
            }
        }
    }

    fn require_result_column_name(
        &self,
        result_column_name: Option<&str>,
        function: &str,
    ) -> Result<String, StoreFunctionsError> {
        result_column_name
            .map(str::to_string)
            .ok_or_else(|| StoreFunctionsError::MissingResultColumnName {
                function: function.to_string(),
            })
    }

    /// Row type for an entity return: the entity's flattened properties in
    /// declaration order, base properties first, typed by the store columns
    /// they map to.
    fn create_entity_row_type(
        &self,
        entity_type: &EntityType,
    ) -> Result<RowType, StoreFunctionsError> {
        let store_types = self.find_store_type_usages(entity_type)?;
        let properties = self.flatten_entity_properties(entity_type)?;

        let columns = properties
            .into_iter()
            .map(|property| {
                let type_usage = store_types.get(&property.name).unwrap_or_else(|| {
                    panic!(
                        "property '{}' of entity type '{}' has no store mapping",
                        property.name, entity_type.name
                    )
                });
                RowColumn {
                    name: property.name.clone(),
                    type_usage: type_usage.clone(),
                }
            })
            .collect();

        Ok(RowType { columns })
    }

    /// Entity properties including inherited ones, with one level of complex
    /// properties expanded in place. Deeper nesting is not supported.
    fn flatten_entity_properties(
        &self,
        entity_type: &EntityType,
    ) -> Result<Vec<&'a EdmProperty>, StoreFunctionsError> {
        let mut properties = Vec::new();

        for declaring_type in self.hierarchy(entity_type).into_iter().rev() {
            for property in &declaring_type.properties {
                if let PropertyType::Complex(complex_name) = &property.property_type {
                    let complex_type = self
                        .model
                        .conceptual_model
                        .complex_type(complex_name)
                        .unwrap_or_else(|| {
                            panic!("complex type '{complex_name}' is not in the conceptual model")
                        });
                    for nested in &complex_type.properties {
                        if nested.is_complex() {
                            return Err(StoreFunctionsError::NestedComplexType);
                        }
                        properties.push(nested);
                    }
                } else {
                    properties.push(property);
                }
            }
        }

        Ok(properties)
    }

    /// Store column types for the entity's properties, looked up across the
    /// mapping fragments of its whole type hierarchy. The first scalar
    /// mapping found wins, scanning the most derived type first.
    fn find_store_type_usages(
        &self,
        entity_type: &EntityType,
    ) -> Result<HashMap<String, TypeUsage>, StoreFunctionsError> {
        let hierarchy = self.hierarchy(entity_type);
        let hierarchy_names: Vec<&str> = hierarchy.iter().map(|t| t.name.as_str()).collect();

        let mut type_mappings = Vec::new();
        for entity_set_mapping in &self.model.mapping.entity_set_mappings {
            for type_mapping in &entity_set_mapping.entity_type_mappings {
                if let Some(position) = hierarchy_names
                    .iter()
                    .position(|n| *n == type_mapping.entity_type)
                {
                    type_mappings.push((position, type_mapping));
                }
            }
        }
        type_mappings.sort_by_key(|(position, _)| *position);

        let mut store_types: HashMap<String, TypeUsage> = HashMap::new();

        for declaring_type in &hierarchy {
            for property in &declaring_type.properties {
                for (_, type_mapping) in &type_mappings {
                    let mapping = type_mapping
                        .fragments
                        .iter()
                        .flat_map(|f| &f.property_mappings)
                        .find(|m| m.property() == property.name);

                    match mapping {
                        Some(PropertyMapping::Scalar(scalar)) => {
                            debug_assert!(
                                !store_types.contains_key(&property.name),
                                "property '{}' mapped twice",
                                property.name
                            );
                            store_types.insert(
                                property.name.clone(),
                                strip_store_facets(&scalar.column.type_usage),
                            );
                            break;
                        }
                        Some(PropertyMapping::Complex(complex)) => {
                            self.add_complex_property_mappings(complex, &mut store_types)?;
                            break;
                        }
                        None => {}
                    }
                }
            }
        }

        Ok(store_types)
    }

    fn add_complex_property_mappings(
        &self,
        complex: &ComplexPropertyMapping,
        store_types: &mut HashMap<String, TypeUsage>,
    ) -> Result<(), StoreFunctionsError> {
        let complex_type = self
            .model
            .conceptual_model
            .complex_type(&complex.complex_type)
            .unwrap_or_else(|| {
                panic!(
                    "complex type '{}' is not in the conceptual model",
                    complex.complex_type
                )
            });

        for property in &complex_type.properties {
            let mapping = complex
                .property_mappings
                .iter()
                .find(|m| m.property() == property.name);

            match mapping {
                Some(PropertyMapping::Scalar(scalar)) => {
                    store_types
                        .entry(property.name.clone())
                        .or_insert_with(|| strip_store_facets(&scalar.column.type_usage));
                }
                _ => return Err(StoreFunctionsError::NestedComplexType),
            }
        }

        Ok(())
    }

    fn default_property_store_type(
        &self,
        property: &EdmProperty,
    ) -> Result<TypeUsage, StoreFunctionsError> {
        let primitive = match &property.property_type {
            PropertyType::Primitive(kind) => *kind,
            PropertyType::Enum(name) => {
                let enum_type = self
                    .model
                    .conceptual_model
                    .enum_type(name)
                    .unwrap_or_else(|| {
                        panic!("enum type '{name}' is not in the conceptual model")
                    });
                enum_type.underlying_type
            }
            PropertyType::Complex(_) => return Err(StoreFunctionsError::NestedComplexType),
        };

        Ok(resolve::store_type_for_primitive(
            &self.model.provider_manifest,
            primitive,
        ))
    }

    fn hierarchy(&self, entity_type: &EntityType) -> Vec<&'a EntityType> {
        // Reanchor on the model's own instance so the returned borrows
        // outlive the argument.
        let anchored = self
            .model
            .conceptual_model
            .entity_type(&entity_type.name)
            .unwrap_or_else(|| {
                panic!(
                    "entity type '{}' is not in the conceptual model",
                    entity_type.name
                )
            });
        tools::type_hierarchy(&self.model.conceptual_model, anchored)
    }
}

fn strip_store_facets(type_usage: &TypeUsage) -> TypeUsage {
    TypeUsage {
        store_type: type_usage.store_type.clone(),
        facets: type_usage
            .facets
            .iter()
            .filter(|f| !STRIPPED_FACETS.contains(&f.name.as_str()))
            .cloned()
            .collect(),
    }
}
