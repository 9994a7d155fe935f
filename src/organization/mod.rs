//! Type organization checks

pub mod god_object;

pub use god_object::{check_god_objects, StructDefinition, TypeInventory};
