//! God object detection for Rust structs.
//!
//! A struct's size is its field count plus the number of methods defined in
//! its inherent `impl` blocks, which may be spread over several files.
//! Trait implementations are not counted since their methods are dictated by
//! the trait.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use syn::visit::{self, Visit};
use syn::{ImplItem, ItemImpl, ItemStruct};

use crate::config::GodObjectThresholds;
use crate::core::GodObjectViolation;

pub const RULE_NAME: &str = "god-object";

/// A struct definition found in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDefinition {
    pub name: String,
    pub field_count: usize,
}

/// Struct definitions and inherent method counts of one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInventory {
    pub file: String,
    pub structs: Vec<StructDefinition>,
    /// Inherent method counts by self type name
    pub inherent_methods: BTreeMap<String, usize>,
}

#[derive(Default)]
struct StructVisitor {
    structs: Vec<StructDefinition>,
    inherent_methods: BTreeMap<String, usize>,
}

impl StructVisitor {
    /// Extract the base type name from a syn::Type, handling generics.
    ///
    /// For example: `Container<T>` becomes `Container`
    fn extract_type_name(ty: &syn::Type) -> Option<String> {
        match ty {
            syn::Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .map(|segment| segment.ident.to_string()),
            _ => None,
        }
    }

    fn track_struct(&mut self, item_struct: &ItemStruct) {
        self.structs.push(StructDefinition {
            name: item_struct.ident.to_string(),
            field_count: item_struct.fields.len(),
        });
    }

    /// Only inherent impls count
    fn track_impl(&mut self, item_impl: &ItemImpl) {
        if item_impl.trait_.is_some() {
            return;
        }

        let Some(struct_name) = Self::extract_type_name(&item_impl.self_ty) else {
            return;
        };

        let method_count = item_impl
            .items
            .iter()
            .filter(|item| matches!(item, ImplItem::Fn(_)))
            .count();

        *self.inherent_methods.entry(struct_name).or_default() += method_count;
    }
}

impl<'ast> Visit<'ast> for StructVisitor {
    fn visit_item_struct(&mut self, node: &'ast ItemStruct) {
        self.track_struct(node);
        visit::visit_item_struct(self, node);
    }

    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        self.track_impl(node);
        visit::visit_item_impl(self, node);
    }
}

/// Collect struct definitions and inherent method counts from a parsed file
pub fn collect_type_inventory(node_id: &str, file: &syn::File) -> TypeInventory {
    let mut visitor = StructVisitor::default();
    visitor.visit_file(file);
    TypeInventory {
        file: node_id.to_string(),
        structs: visitor.structs,
        inherent_methods: visitor.inherent_methods,
    }
}

/// Flag structs with too many fields or inherent methods.
///
/// Structs are keyed by name across the whole tree. The first definition in
/// file order supplies the reported file and field count; methods from every
/// file are summed. Output is sorted by struct name.
pub fn check_god_objects(
    inventories: &[TypeInventory],
    thresholds: &GodObjectThresholds,
) -> Vec<GodObjectViolation> {
    let mut ordered: Vec<&TypeInventory> = inventories.iter().collect();
    ordered.sort_by(|a, b| a.file.cmp(&b.file));

    let mut definitions: BTreeMap<&str, (&str, usize)> = BTreeMap::new();
    let mut methods: BTreeMap<&str, usize> = BTreeMap::new();

    for inventory in ordered {
        for definition in &inventory.structs {
            definitions
                .entry(definition.name.as_str())
                .or_insert((inventory.file.as_str(), definition.field_count));
        }
        for (type_name, count) in &inventory.inherent_methods {
            *methods.entry(type_name.as_str()).or_default() += count;
        }
    }

    definitions
        .into_iter()
        .filter_map(|(name, (file, field_count))| {
            let method_count = methods.get(name).copied().unwrap_or(0);
            let too_big =
                field_count > thresholds.max_fields || method_count > thresholds.max_methods;
            too_big.then(|| GodObjectViolation {
                struct_name: name.to_string(),
                file: file.to_string(),
                field_count,
                method_count,
            })
        })
        .collect()
}
