//! Error types for store-functions

use thiserror::Error;

/// Errors raised while discovering functions and synthesizing store function
/// metadata.
///
/// Every variant is terminal: the first failure aborts the whole discovery
/// and build pass, and nothing discovered so far is registered.
#[derive(Error, Debug, PartialEq)]
pub enum StoreFunctionsError {
    #[error("The type '{type_name}' of the parameter '{parameter}' of function '{function}' is invalid. Parameters can only be of a type that can be converted to an Edm scalar type.")]
    InvalidParameterType {
        type_name: String,
        parameter: String,
        function: String,
    },

    #[error("The parameter '{parameter}' of the function '{function}' is an out or ref parameter. To map Input/Output or Output database parameters use a parameter of the ObjectParameter type annotated with the ParameterTypeAttribute.")]
    OutOrRefParameter { parameter: String, function: String },

    #[error("The parameter '{parameter}' of the function '{function}' is of the ObjectParameter type but is not annotated with the ParameterTypeAttribute. The attribute is required to determine the type of the parameter.")]
    MissingParameterTypeAttribute { parameter: String, function: String },

    #[error("No EdmType found for type '{type_name}'.")]
    UnresolvableType { type_name: String },

    #[error("The method '{function}' could not be mapped to a scalar user defined function. Scalar user defined functions must be decorated with the DbFunction attribute whose namespace parameter is set to 'CodeFirstDatabaseSchema'.")]
    ScalarFunctionMissingDbFunctionAttribute { function: String },

    #[error("The return type '{type_name}' of the scalar user defined function '{function}' is invalid. Scalar user defined functions can only return Edm primitive types.")]
    InvalidScalarReturnType { type_name: String, function: String },

    #[error("The type '{type_name}' of the parameter '{parameter}' of the scalar user defined function '{function}' is invalid. Parameters of scalar user defined functions can only be of Edm primitive types.")]
    InvalidScalarParameterType {
        type_name: String,
        parameter: String,
        function: String,
    },

    #[error("The DbFunctionDetailsAttribute.ResultTypes property set on the method '{function}' should be used only for stored procedures returning multiple resultsets and must be null for composable function imports.")]
    ResultTypesOnComposableFunction { function: String },

    #[error("The ObjectResult<T> item type returned by the method '{function}' is '{return_type}' but the first type specified in the DbFunctionDetailsAttribute.ResultTypes is '{result_type}'. The ObjectResult<T> item type must match the first type from the DbFunctionDetailsAttribute.ResultTypes.")]
    ResultTypesMismatch {
        function: String,
        return_type: String,
        result_type: String,
    },

    #[error("Database schema is not defined for function '{function}'. Either set a default database schema or use the DbFunctionDetails attribute with a non-null DatabaseSchema value.")]
    MissingSchema { function: String },

    #[error("No store EdmType with the name '{store_type}' could be found.")]
    StoreTypeNotFound { store_type: String },

    #[error("The model does not contain EntitySet for the '{entity_type}' entity type.")]
    MissingEntitySet { entity_type: String },

    #[error("Nested complex types are not supported.")]
    NestedComplexType,

    #[error("The function '{function}' returns a collection of scalar values but does not specify the DbFunctionDetailsAttribute.ResultColumnName needed to name the result column.")]
    MissingResultColumnName { function: String },
}
