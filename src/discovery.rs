//! Function discovery
//!
//! Scans a method class, classifies each method as a table valued function,
//! scalar user defined function or stored procedure candidate, validates
//! parameter and return shapes against the conceptual model, and produces
//! function descriptors. Methods that match no candidate shape are skipped;
//! the first invalid candidate fails the whole pass.

use crate::descriptor::{FunctionDescriptor, ParameterDescriptor, StoreFunctionKind};
use crate::edm::{ConceptualModel, EdmType};
use crate::error::StoreFunctionsError;
use crate::resolve;
use crate::signature::{ClrType, MethodClass, MethodSignature, ParameterDirection, ParameterSignature};
use crate::CODE_FIRST_DATABASE_SCHEMA;

/// Classifies a method against the function candidate shapes.
///
/// A method with the DbFunction attribute is always a candidate: a queryable
/// return makes it a table valued function, a multi-result return a stored
/// procedure, anything else a scalar user defined function. Without the
/// attribute only the multi-result return shape is recognized, as a stored
/// procedure. Everything else is not a candidate.
pub fn classify(method: &MethodSignature) -> Option<StoreFunctionKind> {
    if method.db_function.is_some() {
        if method.return_type.queryable_element().is_some() {
            Some(StoreFunctionKind::TableValuedFunction)
        } else if method.return_type.multi_result_element().is_some() {
            Some(StoreFunctionKind::StoredProcedure)
        } else {
            Some(StoreFunctionKind::ScalarUserDefinedFunction)
        }
    } else if method.return_type.multi_result_element().is_some() {
        Some(StoreFunctionKind::StoredProcedure)
    } else {
        None
    }
}

/// Discovers function descriptors on a method class
pub struct FunctionDiscovery<'a> {
    model: &'a ConceptualModel,
    owner: &'a MethodClass,
}

impl<'a> FunctionDiscovery<'a> {
    pub fn new(model: &'a ConceptualModel, owner: &'a MethodClass) -> Self {
        Self { model, owner }
    }

    /// One descriptor per recognized method, in declaration order. Fails on
    /// the first invalid candidate.
    pub fn find_functions(&self) -> Result<Vec<FunctionDescriptor>, StoreFunctionsError> {
        let mut descriptors = Vec::new();
        for method in &self.owner.methods {
            if let Some(descriptor) = self.create_descriptor(method)? {
                descriptors.push(descriptor);
            }
        }
        Ok(descriptors)
    }

    fn create_descriptor(
        &self,
        method: &MethodSignature,
    ) -> Result<Option<FunctionDescriptor>, StoreFunctionsError> {
        let Some(kind) = classify(method) else {
            return Ok(None);
        };

        if kind == StoreFunctionKind::ScalarUserDefinedFunction {
            // The classifier only produces this kind for attributed methods.
            let attribute = method
                .db_function
                .as_ref()
                .expect("scalar function candidate without the DbFunction attribute");
            if attribute.namespace_name != CODE_FIRST_DATABASE_SCHEMA {
                return Err(StoreFunctionsError::ScalarFunctionMissingDbFunctionAttribute {
                    function: method.name.clone(),
                });
            }
        }

        let parameters = self.create_parameters(method, kind)?;
        let return_types = self.create_return_types(method, kind)?;

        let name = method
            .db_function
            .as_ref()
            .map(|a| a.function_name.clone())
            .unwrap_or_else(|| method.name.clone());
        let details = method.details.as_ref();

        Ok(Some(FunctionDescriptor::new(
            name,
            parameters,
            return_types,
            details.and_then(|d| d.result_column_name.clone()),
            details.and_then(|d| d.database_schema.clone()),
            kind,
            details.and_then(|d| d.is_built_in),
            details.and_then(|d| d.is_niladic),
        )))
    }

    fn create_parameters(
        &self,
        method: &MethodSignature,
        kind: StoreFunctionKind,
    ) -> Result<Vec<ParameterDescriptor>, StoreFunctionsError> {
        // The first parameter of an extension method is the receiver, not a
        // function argument.
        let skip = usize::from(method.is_extension);

        method
            .parameters
            .iter()
            .skip(skip)
            .map(|parameter| self.create_parameter(method, parameter, kind))
            .collect()
    }

    fn create_parameter(
        &self,
        method: &MethodSignature,
        parameter: &ParameterSignature,
        kind: StoreFunctionKind,
    ) -> Result<ParameterDescriptor, StoreFunctionsError> {
        if parameter.direction != ParameterDirection::In {
            return Err(StoreFunctionsError::OutOrRefParameter {
                parameter: parameter.name.clone(),
                function: method.name.clone(),
            });
        }

        // ObjectParameter carries no usable static type; the ParameterType
        // attribute declares the logical type and marks the parameter as an
        // Input/Output parameter.
        let (clr_type, store_type, is_out_param) =
            if parameter.clr_type == ClrType::ObjectParameter {
                let Some(attribute) = &parameter.parameter_type else {
                    return Err(StoreFunctionsError::MissingParameterTypeAttribute {
                        parameter: parameter.name.clone(),
                        function: method.name.clone(),
                    });
                };
                (&attribute.clr_type, attribute.store_type.clone(), true)
            } else {
                (&parameter.clr_type, None, false)
            };

        let unwrapped = clr_type.unwrap_nullable();
        let edm_type = resolve::resolve_parameter_type(self.model, clr_type).ok_or_else(|| {
            StoreFunctionsError::InvalidParameterType {
                type_name: unwrapped.full_name(),
                parameter: parameter.name.clone(),
                function: method.name.clone(),
            }
        })?;

        if kind == StoreFunctionKind::ScalarUserDefinedFunction && !edm_type.is_primitive() {
            return Err(StoreFunctionsError::InvalidScalarParameterType {
                type_name: unwrapped.full_name(),
                parameter: parameter.name.clone(),
                function: method.name.clone(),
            });
        }

        Ok(ParameterDescriptor::new(
            parameter.name.clone(),
            edm_type,
            store_type,
            is_out_param,
        ))
    }

    fn create_return_types(
        &self,
        method: &MethodSignature,
        kind: StoreFunctionKind,
    ) -> Result<Vec<EdmType>, StoreFunctionsError> {
        let result_types = method.details.as_ref().and_then(|d| d.result_types.as_ref());

        // The result-type list is only meaningful on stored procedures
        // returning multiple result sets.
        if result_types.is_some() && kind != StoreFunctionKind::StoredProcedure {
            return Err(StoreFunctionsError::ResultTypesOnComposableFunction {
                function: method.name.clone(),
            });
        }

        let return_item = match kind {
            StoreFunctionKind::TableValuedFunction => method
                .return_type
                .queryable_element()
                .expect("table valued function candidate without a queryable return"),
            StoreFunctionKind::StoredProcedure => method
                .return_type
                .multi_result_element()
                .expect("stored procedure candidate without a multi-result return"),
            StoreFunctionKind::ScalarUserDefinedFunction => &method.return_type,
        };

        if kind == StoreFunctionKind::ScalarUserDefinedFunction {
            let unwrapped = return_item.unwrap_nullable();
            let Some(primitive) = resolve::clr_to_primitive(unwrapped) else {
                return Err(StoreFunctionsError::InvalidScalarReturnType {
                    type_name: unwrapped.full_name(),
                    function: method.name.clone(),
                });
            };
            return Ok(vec![EdmType::Primitive(primitive)]);
        }

        if let Some(result_types) = result_types {
            // An empty list means the attribute property was not really set;
            // fall back to the declared return item.
            if let Some(first) = result_types.first() {
                if first != return_item {
                    return Err(StoreFunctionsError::ResultTypesMismatch {
                        function: method.name.clone(),
                        return_type: return_item.full_name(),
                        result_type: first.full_name(),
                    });
                }

                return result_types
                    .iter()
                    .map(|t| resolve::resolve_return_item_type(self.model, t))
                    .collect();
            }
        }

        Ok(vec![resolve::resolve_return_item_type(
            self.model,
            return_item,
        )?])
    }
}
