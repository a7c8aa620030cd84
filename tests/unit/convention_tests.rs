//! Unit tests for the functions convention

use store_functions::convention::FunctionsConvention;
use store_functions::edm::{EdmType, FunctionImportMapping, PrimitiveTypeKind};
use store_functions::signature::{
    ClrType, DbFunctionDetailsAttribute, MethodSignature, ParameterSignature,
};
use store_functions::StoreFunctionsError;

use crate::common::{method_class, sql_server_model, tvf_method};

#[test]
fn test_apply_registers_import_store_function_and_mapping() {
    let mut model = sql_server_model();
    let owner = method_class(vec![tvf_method(
        "GetCustomers",
        vec![ParameterSignature::new("minId", ClrType::Int32)],
        ClrType::Named("Customer".to_string()),
    )]);

    FunctionsConvention::new(Some("dbo"), &owner)
        .apply(&mut model)
        .unwrap();

    let imports = &model.conceptual_model.container.function_imports;
    assert_eq!(imports.len(), 1);
    let import = &imports[0];
    assert_eq!(import.name, "GetCustomers");
    assert_eq!(import.namespace_name, "MyContext");
    assert!(import.is_composable);
    assert_eq!(import.parameters.len(), 1);
    assert_eq!(
        import.parameters[0].edm_type,
        EdmType::Primitive(PrimitiveTypeKind::Int32)
    );
    assert_eq!(import.return_parameters.len(), 1);
    assert_eq!(import.return_parameters[0].name, "ReturnParam0");
    assert_eq!(import.entity_sets, vec![Some("Customers".to_string())]);

    let function = model.store_model.function("GetCustomers").unwrap();
    assert_eq!(function.schema, "dbo");

    assert_eq!(model.mapping.function_import_mappings.len(), 1);
    assert!(matches!(
        &model.mapping.function_import_mappings[0],
        FunctionImportMapping::Composable {
            function_import,
            store_function,
            ..
        } if function_import == "GetCustomers" && store_function == "GetCustomers"
    ));
}

#[test]
fn test_derived_entity_binds_to_the_base_entity_set() {
    let mut model = sql_server_model();
    let owner = method_class(vec![tvf_method(
        "GetPremiumCustomers",
        vec![],
        ClrType::Named("PremiumCustomer".to_string()),
    )]);

    FunctionsConvention::new(Some("dbo"), &owner)
        .apply(&mut model)
        .unwrap();

    let import = &model.conceptual_model.container.function_imports[0];
    assert_eq!(import.entity_sets, vec![Some("Customers".to_string())]);
}

#[test]
fn test_entity_without_entity_set_fails() {
    let mut model = sql_server_model();
    model
        .conceptual_model
        .entity_types
        .push(store_functions::edm::EntityType {
            name: "Orphan".to_string(),
            base_type: None,
            properties: vec![],
        });
    let owner = method_class(vec![tvf_method(
        "GetOrphans",
        vec![],
        ClrType::Named("Orphan".to_string()),
    )]);

    let err = FunctionsConvention::new(Some("dbo"), &owner)
        .apply(&mut model)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The model does not contain EntitySet for the 'Model.Orphan' entity type."
    );
}

#[test]
fn test_stored_procedure_gets_a_non_composable_mapping() {
    let mut model = sql_server_model();
    let owner = method_class(vec![MethodSignature::new(
        "GetCustomersProc",
        ClrType::multi_result(ClrType::Named("Customer".to_string())),
    )]);

    FunctionsConvention::new(Some("dbo"), &owner)
        .apply(&mut model)
        .unwrap();

    let import = &model.conceptual_model.container.function_imports[0];
    assert!(!import.is_composable);

    let function = model.store_model.function("GetCustomersProc").unwrap();
    assert!(!function.is_composable);
    assert!(function.return_parameters.is_empty());

    assert!(matches!(
        &model.mapping.function_import_mappings[0],
        FunctionImportMapping::NonComposable { result_mappings, .. } if result_mappings.is_empty()
    ));
}

#[test]
fn test_scalar_return_imports_have_no_entity_set_binding() {
    let mut model = sql_server_model();
    let mut method = tvf_method("GetIds", vec![], ClrType::Int32);
    method.details = Some(DbFunctionDetailsAttribute {
        result_column_name: Some("Id".to_string()),
        ..Default::default()
    });
    let owner = method_class(vec![method]);

    FunctionsConvention::new(Some("dbo"), &owner)
        .apply(&mut model)
        .unwrap();

    let import = &model.conceptual_model.container.function_imports[0];
    assert_eq!(import.entity_sets, vec![None]);
}

#[test]
fn test_a_failing_method_registers_nothing() {
    let mut model = sql_server_model();
    let owner = method_class(vec![
        tvf_method(
            "GetCustomers",
            vec![],
            ClrType::Named("Customer".to_string()),
        ),
        tvf_method(
            "InvalidParamFunc",
            vec![ParameterSignature::new("p1", ClrType::Object)],
            ClrType::Int32,
        ),
    ]);

    let err = FunctionsConvention::new(Some("dbo"), &owner)
        .apply(&mut model)
        .unwrap_err();

    assert!(matches!(
        err,
        StoreFunctionsError::InvalidParameterType { .. }
    ));
    assert!(model.conceptual_model.container.function_imports.is_empty());
    assert!(model.store_model.functions.is_empty());
    assert!(model.mapping.function_import_mappings.is_empty());
}
