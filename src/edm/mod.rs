//! In-memory EDM metadata: conceptual model, store model, mapping and
//! provider manifest

mod conceptual;
mod manifest;
mod mapping;
mod model;
mod store;
mod types;

pub use conceptual::*;
pub use manifest::*;
pub use mapping::*;
pub use model::DbModel;
pub use store::*;
pub use types::*;
