//! Model augmentation convention
//!
//! The registration entry point. Runs discovery over a method class, builds
//! the conceptual function import and the store function for each descriptor,
//! and commits all three artifacts (import, store function, mapping) to the
//! model. Commits happen only after every descriptor built cleanly, so a
//! failing method leaves the model untouched.

use crate::descriptor::{FunctionDescriptor, StoreFunctionKind};
use crate::discovery::FunctionDiscovery;
use crate::edm::{
    DbModel, EdmType, FunctionImport, FunctionImportMapping, FunctionImportParameter,
    FunctionImportResultMapping, FunctionImportReturn, StoreFunction,
};
use crate::error::StoreFunctionsError;
use crate::signature::MethodClass;
use crate::store_builder::StoreFunctionBuilder;
use crate::tools;

/// Augments a model with the store functions discovered on a method class
pub struct FunctionsConvention<'a> {
    default_schema: Option<String>,
    owner: &'a MethodClass,
}

impl<'a> FunctionsConvention<'a> {
    pub fn new(default_schema: Option<&str>, owner: &'a MethodClass) -> Self {
        Self {
            default_schema: default_schema.map(str::to_string),
            owner,
        }
    }

    pub fn apply(&self, model: &mut DbModel) -> Result<(), StoreFunctionsError> {
        let descriptors =
            FunctionDiscovery::new(&model.conceptual_model, self.owner).find_functions()?;

        let builder = StoreFunctionBuilder::new(model, self.default_schema.as_deref());

        let mut registrations: Vec<(FunctionImport, StoreFunction, FunctionImportMapping)> =
            Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let function_import = create_function_import(model, descriptor)?;
            let store_function = builder.create(descriptor)?;
            let mapping = create_function_import_mapping(&function_import, &store_function);
            registrations.push((function_import, store_function, mapping));
        }

        for (function_import, store_function, mapping) in registrations {
            model
                .conceptual_model
                .container
                .add_function_import(function_import);
            model.store_model.add_function(store_function);
            model.mapping.add_function_import_mapping(mapping);
        }

        Ok(())
    }
}

fn create_function_import_mapping(
    function_import: &FunctionImport,
    store_function: &StoreFunction,
) -> FunctionImportMapping {
    if function_import.is_composable {
        FunctionImportMapping::Composable {
            function_import: function_import.name.clone(),
            store_function: store_function.name.clone(),
            result_mapping: FunctionImportResultMapping::new(),
        }
    } else {
        FunctionImportMapping::NonComposable {
            function_import: function_import.name.clone(),
            store_function: store_function.name.clone(),
            result_mappings: Vec::new(),
        }
    }
}

fn create_function_import(
    model: &DbModel,
    descriptor: &FunctionDescriptor,
) -> Result<FunctionImport, StoreFunctionsError> {
    let (return_parameters, entity_sets) = create_return_parameters(model, descriptor)?;

    let parameters = descriptor
        .parameters()
        .iter()
        .map(|p| FunctionImportParameter {
            name: p.name().to_string(),
            edm_type: p.edm_type().clone(),
        })
        .collect();

    Ok(FunctionImport {
        name: descriptor.name().to_string(),
        namespace_name: model.conceptual_model.container.name.clone(),
        parameters,
        return_parameters,
        entity_sets,
        is_composable: descriptor.store_function_kind() != StoreFunctionKind::StoredProcedure,
    })
}

/// One return parameter per result type, each bound to the entity set of its
/// element type when that element is an entity.
fn create_return_parameters(
    model: &DbModel,
    descriptor: &FunctionDescriptor,
) -> Result<(Vec<FunctionImportReturn>, Vec<Option<String>>), StoreFunctionsError> {
    let mut return_parameters = Vec::with_capacity(descriptor.return_types().len());
    let mut entity_sets = Vec::with_capacity(descriptor.return_types().len());

    for (index, return_type) in descriptor.return_types().iter().enumerate() {
        let entity_set = if let EdmType::Entity { name } = return_type {
            Some(find_entity_set(model, name, return_type)?)
        } else {
            None
        };

        entity_sets.push(entity_set);
        return_parameters.push(FunctionImportReturn {
            name: format!("ReturnParam{index}"),
            element_type: return_type.clone(),
        });
    }

    Ok((return_parameters, entity_sets))
}

/// The entity set holding the given entity type, searched across its whole
/// type hierarchy so derived types resolve to their base type's set.
fn find_entity_set(
    model: &DbModel,
    entity_type_name: &str,
    return_type: &EdmType,
) -> Result<String, StoreFunctionsError> {
    let entity_type = model
        .conceptual_model
        .entity_type(entity_type_name)
        .unwrap_or_else(|| {
            panic!("entity type '{entity_type_name}' is not in the conceptual model")
        });

    let hierarchy = tools::type_hierarchy(&model.conceptual_model, entity_type);

    let matching: Vec<&str> = model
        .conceptual_model
        .container
        .entity_sets
        .iter()
        .filter(|s| hierarchy.iter().any(|t| t.name == s.element_type))
        .map(|s| s.name.as_str())
        .collect();

    if matching.is_empty() {
        return Err(StoreFunctionsError::MissingEntitySet {
            entity_type: return_type.full_name(&model.conceptual_model.namespace_name),
        });
    }

    // Multiple sets for one hierarchy (MEST) cannot come out of a code-first
    // model builder.
    debug_assert!(matching.len() == 1, "invalid model (MEST)");

    Ok(matching[0].to_string())
}
