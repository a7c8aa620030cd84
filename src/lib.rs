//! store-functions: store function support for code-first EDM models
//!
//! This library augments a built code-first model with table valued
//! functions, scalar user defined functions and stored procedures. Methods
//! described as signature descriptors are discovered, validated against the
//! conceptual model and registered as store functions, conceptual function
//! imports and the mappings that join them.

pub mod convention;
pub mod descriptor;
pub mod discovery;
pub mod edm;
pub mod error;
pub mod resolve;
pub mod signature;
pub mod store_builder;
pub mod tools;

use anyhow::Result;

use convention::FunctionsConvention;
use edm::DbModel;
use signature::MethodClass;

pub use error::StoreFunctionsError;

/// The namespace code-first model builders reserve for store-space items.
/// Scalar user defined functions must declare it on their DbFunction
/// attribute, and every synthesized store function is placed in it.
pub const CODE_FIRST_DATABASE_SCHEMA: &str = "CodeFirstDatabaseSchema";

/// Options for registering the functions of a method class
#[derive(Debug, Clone, Default)]
pub struct ConventionOptions {
    /// Schema for functions that do not set DbFunctionDetails.DatabaseSchema
    pub default_schema: Option<String>,
    /// Enable verbose output
    pub verbose: bool,
}

/// Register all functions discovered on a method class into the model
pub fn register_functions(
    model: &mut DbModel,
    owner: &MethodClass,
    options: &ConventionOptions,
) -> Result<()> {
    if options.verbose {
        println!("Discovering functions on: {}", owner.name);
    }

    let convention = FunctionsConvention::new(options.default_schema.as_deref(), owner);
    convention.apply(model)?;

    if options.verbose {
        println!(
            "Registered {} function imports",
            model.conceptual_model.container.function_imports.len()
        );
        println!(
            "Store model now has {} functions",
            model.store_model.functions.len()
        );
    }

    Ok(())
}
