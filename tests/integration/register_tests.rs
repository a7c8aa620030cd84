//! End-to-end registration tests
//!
//! These run the full pipeline: discovery, store function synthesis and
//! model registration through the public entry point.

use store_functions::edm::{FunctionImportMapping, StoreReturnType};
use store_functions::signature::{
    ClrType, DbFunctionDetailsAttribute, MethodSignature, ParameterSignature,
};
use store_functions::{register_functions, ConventionOptions, StoreFunctionsError};

use crate::common::{attributed_method, method_class, sql_server_model, tvf_method};

fn default_options() -> ConventionOptions {
    ConventionOptions {
        default_schema: Some("dbo".to_string()),
        verbose: false,
    }
}

#[test]
fn test_register_a_mixed_method_class() {
    let mut model = sql_server_model();
    let owner = method_class(vec![
        // Table valued function returning mapped entities.
        tvf_method(
            "GetCustomersByName",
            vec![ParameterSignature::new("name", ClrType::String)],
            ClrType::Named("Customer".to_string()),
        ),
        // Scalar user defined function.
        attributed_method(
            "CustomerCount",
            "CodeFirstDatabaseSchema",
            vec![],
            ClrType::Int32,
        ),
        // Stored procedure, recognized without an attribute.
        MethodSignature::new(
            "DeleteInactiveCustomers",
            ClrType::multi_result(ClrType::Int32),
        ),
        // Not a candidate shape, silently skipped.
        MethodSignature::new("SaveChanges", ClrType::Int32),
    ]);

    register_functions(&mut model, &owner, &default_options()).unwrap();

    let imports = &model.conceptual_model.container.function_imports;
    assert_eq!(imports.len(), 3);
    assert_eq!(model.store_model.functions.len(), 3);
    assert_eq!(model.mapping.function_import_mappings.len(), 3);

    let tvf = model.store_model.function("GetCustomersByName").unwrap();
    assert!(tvf.is_composable);
    assert_eq!(tvf.schema, "dbo");
    assert_eq!(tvf.namespace_name, "CodeFirstDatabaseSchema");
    let StoreReturnType::RowCollection(row_type) = &tvf.return_parameters[0].return_type else {
        panic!("expected a row collection return");
    };
    assert_eq!(row_type.columns.len(), 4);

    let udf = model.store_model.function("CustomerCount").unwrap();
    assert!(udf.is_composable);
    assert!(matches!(
        udf.return_parameters[0].return_type,
        StoreReturnType::Scalar(_)
    ));

    let sproc = model.store_model.function("DeleteInactiveCustomers").unwrap();
    assert!(!sproc.is_composable);
    assert!(sproc.return_parameters.is_empty());

    let composable_mappings = model
        .mapping
        .function_import_mappings
        .iter()
        .filter(|m| matches!(m, FunctionImportMapping::Composable { .. }))
        .count();
    assert_eq!(composable_mappings, 2);
}

#[test]
fn test_register_is_idempotent_per_function_name() {
    let mut model = sql_server_model();
    let owner = method_class(vec![tvf_method(
        "GetCustomers",
        vec![],
        ClrType::Named("Customer".to_string()),
    )]);

    register_functions(&mut model, &owner, &default_options()).unwrap();
    let first = model.store_model.function("GetCustomers").unwrap().clone();

    // A second registration pass produces the same store function metadata.
    register_functions(&mut model, &owner, &default_options()).unwrap();
    let second = model.store_model.functions.last().unwrap();

    assert_eq!(&first, second);
}

#[test]
fn test_registration_failure_surfaces_the_validation_error() {
    let mut model = sql_server_model();
    let owner = method_class(vec![attributed_method(
        "BadScalar",
        "Model",
        vec![],
        ClrType::Int32,
    )]);

    let err = register_functions(&mut model, &owner, &default_options()).unwrap_err();

    let source = err.downcast_ref::<StoreFunctionsError>().unwrap();
    assert!(matches!(
        source,
        StoreFunctionsError::ScalarFunctionMissingDbFunctionAttribute { .. }
    ));
    assert!(model.conceptual_model.container.function_imports.is_empty());
}

#[test]
fn test_register_multi_result_stored_procedure() {
    let mut model = sql_server_model();
    let mut method = MethodSignature::new(
        "GetCustomersAndAddresses",
        ClrType::multi_result(ClrType::Named("Customer".to_string())),
    );
    method.details = Some(DbFunctionDetailsAttribute {
        result_types: Some(vec![
            ClrType::Named("Customer".to_string()),
            ClrType::Named("Address".to_string()),
        ]),
        ..Default::default()
    });
    let owner = method_class(vec![method]);

    register_functions(&mut model, &owner, &default_options()).unwrap();

    let import = &model.conceptual_model.container.function_imports[0];
    assert_eq!(import.return_parameters.len(), 2);
    assert_eq!(import.return_parameters[0].name, "ReturnParam0");
    assert_eq!(import.return_parameters[1].name, "ReturnParam1");
    // Only the entity result binds to an entity set.
    assert_eq!(
        import.entity_sets,
        vec![Some("Customers".to_string()), None]
    );
}

#[test]
fn test_missing_default_schema_without_details_fails() {
    let mut model = sql_server_model();
    let owner = method_class(vec![tvf_method(
        "GetCustomers",
        vec![],
        ClrType::Named("Customer".to_string()),
    )]);
    let options = ConventionOptions::default();

    let err = register_functions(&mut model, &owner, &options).unwrap_err();

    let source = err.downcast_ref::<StoreFunctionsError>().unwrap();
    assert!(matches!(source, StoreFunctionsError::MissingSchema { .. }));
}
