//! Module-level import extraction for Rust sources.
//!
//! Each source file is one node. A file depends on another when one of its
//! `use` declarations names a path that resolves to that file's module.
//! Paths that leave the crate (std, third-party crates, `::`-rooted paths)
//! are dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};
use syn::visit::{self, Visit};
use syn::{ItemMod, ItemUse, UseTree};

use crate::core::ModuleImports;

const CRATE_ROOT_FILES: [&str; 2] = ["lib.rs", "main.rs"];

/// Node identifier for a file: its path relative to `root`, `/`-separated.
pub fn node_id_for(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Where a file sits in its crate's module tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    pub crate_dir: String,
    pub module_path: Vec<String>,
}

/// Maps module paths to the files that define them.
///
/// Crate directories are inferred from `lib.rs` / `main.rs` files; a file
/// belongs to the crate whose directory is its longest matching prefix.
/// Files outside any such directory are resolved against the walk root.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    modules: BTreeMap<(String, Vec<String>), String>,
    crate_dirs: Vec<String>,
}

impl ModuleIndex {
    pub fn build<S: AsRef<str>>(node_ids: &[S]) -> Self {
        let mut crate_dirs: BTreeSet<String> = node_ids
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|id| {
                let (dir, file) = split_dir(id);
                CRATE_ROOT_FILES.contains(&file).then(|| dir.to_string())
            })
            .collect();
        crate_dirs.insert(String::new());

        // Longest directory first so nested crates win
        let mut crate_dirs: Vec<String> = crate_dirs.into_iter().collect();
        crate_dirs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut index = Self {
            modules: BTreeMap::new(),
            crate_dirs,
        };

        let mut sorted: Vec<&str> = node_ids.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        for id in sorted {
            let location = index.locate(id);
            index
                .modules
                .entry((location.crate_dir, location.module_path))
                .or_insert_with(|| id.to_string());
        }

        index
    }

    pub fn locate(&self, node_id: &str) -> ModuleLocation {
        let crate_dir = self
            .crate_dirs
            .iter()
            .find(|dir| dir.is_empty() || node_id.starts_with(&format!("{}/", dir)))
            .cloned()
            .unwrap_or_default();

        let relative = if crate_dir.is_empty() {
            node_id
        } else {
            &node_id[crate_dir.len() + 1..]
        };

        ModuleLocation {
            module_path: module_path_of(relative),
            crate_dir,
        }
    }

    fn lookup(&self, crate_dir: &str, module_path: &[String]) -> Option<&str> {
        self.modules
            .get(&(crate_dir.to_string(), module_path.to_vec()))
            .map(String::as_str)
    }

    fn has_module(&self, crate_dir: &str, module_path: &[String]) -> bool {
        self.lookup(crate_dir, module_path).is_some()
    }

    /// Resolve a flattened `use` path seen inside module `current`.
    ///
    /// Returns the file of the longest module prefix of the path. Paths that
    /// only reach the crate root are not resolved.
    pub fn resolve(&self, crate_dir: &str, current: &[String], segments: &[String]) -> Option<&str> {
        let (first, rest) = segments.split_first()?;

        let (base, remaining): (Vec<String>, &[String]) = match first.as_str() {
            "crate" => (Vec::new(), rest),
            "self" => (current.to_vec(), rest),
            "super" => {
                let mut base = current.to_vec();
                base.pop();
                let mut rest = rest;
                while let Some((next, tail)) = rest.split_first() {
                    if next != "super" {
                        break;
                    }
                    base.pop();
                    rest = tail;
                }
                (base, rest)
            }
            _ => {
                let mut child = current.to_vec();
                child.push(first.clone());
                if self.has_module(crate_dir, &child) {
                    (current.to_vec(), segments)
                } else if self.has_module(crate_dir, std::slice::from_ref(first)) {
                    (Vec::new(), segments)
                } else {
                    return None;
                }
            }
        };

        (0..=remaining.len()).rev().find_map(|take| {
            let mut candidate = base.clone();
            candidate.extend_from_slice(&remaining[..take]);
            if candidate.is_empty() {
                return None;
            }
            self.lookup(crate_dir, &candidate)
        })
    }
}

fn split_dir(node_id: &str) -> (&str, &str) {
    match node_id.rfind('/') {
        Some(pos) => (&node_id[..pos], &node_id[pos + 1..]),
        None => ("", node_id),
    }
}

/// `handler/user.rs` -> `[handler, user]`, `handler/mod.rs` -> `[handler]`,
/// `lib.rs` -> `[]`
fn module_path_of(relative: &str) -> Vec<String> {
    if CRATE_ROOT_FILES.contains(&relative) {
        return Vec::new();
    }

    let stem = relative.strip_suffix(".rs").unwrap_or(relative);
    let mut parts: Vec<String> = stem.split('/').map(str::to_string).collect();
    if parts.last().map(String::as_str) == Some("mod") {
        parts.pop();
    }
    parts
}

/// A flattened `use` path together with the module it was written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsePath {
    pub module: Vec<String>,
    pub segments: Vec<String>,
}

/// Collects every `use` path in a file, including those inside inline
/// modules and function bodies.
struct UseCollector {
    module_stack: Vec<String>,
    paths: Vec<UsePath>,
}

impl UseCollector {
    fn new(file_module: Vec<String>) -> Self {
        Self {
            module_stack: file_module,
            paths: Vec::new(),
        }
    }

    fn flatten(&mut self, tree: &UseTree, prefix: &[String]) {
        match tree {
            UseTree::Path(path) => {
                let mut new_prefix = prefix.to_vec();
                new_prefix.push(path.ident.to_string());
                self.flatten(&path.tree, &new_prefix);
            }
            UseTree::Name(name) => {
                let mut full_path = prefix.to_vec();
                // `use a::b::{self}` names the module itself
                if name.ident != "self" || prefix.is_empty() {
                    full_path.push(name.ident.to_string());
                }
                self.record(full_path);
            }
            UseTree::Rename(rename) => {
                let mut full_path = prefix.to_vec();
                if rename.ident != "self" || prefix.is_empty() {
                    full_path.push(rename.ident.to_string());
                }
                self.record(full_path);
            }
            UseTree::Glob(_) => self.record(prefix.to_vec()),
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.flatten(tree, prefix);
                }
            }
        }
    }

    fn record(&mut self, segments: Vec<String>) {
        if segments.is_empty() {
            return;
        }
        self.paths.push(UsePath {
            module: self.module_stack.clone(),
            segments,
        });
    }
}

impl<'ast> Visit<'ast> for UseCollector {
    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        if node.content.is_some() {
            self.module_stack.push(node.ident.to_string());
            visit::visit_item_mod(self, node);
            self.module_stack.pop();
        }
    }

    fn visit_item_use(&mut self, node: &'ast ItemUse) {
        // `use ::foo` always names an external crate
        if node.leading_colon.is_some() {
            return;
        }
        self.flatten(&node.tree, &[]);
    }
}

/// All `use` paths of a parsed file, relative to the module at `location`
pub fn collect_use_paths(file: &syn::File, location: &ModuleLocation) -> Vec<UsePath> {
    let mut collector = UseCollector::new(location.module_path.clone());
    collector.visit_file(file);
    collector.paths
}

/// Resolve a parsed file's `use` paths into its intra-crate dependencies
pub fn resolve_imports(node_id: &str, file: &syn::File, index: &ModuleIndex) -> ModuleImports {
    let location = index.locate(node_id);

    let depends_on: BTreeSet<String> = collect_use_paths(file, &location)
        .iter()
        .filter_map(|path| index.resolve(&location.crate_dir, &path.module, &path.segments))
        .filter(|target| *target != node_id)
        .map(str::to_string)
        .collect();

    ModuleImports::new(node_id, depends_on.into_iter().collect())
}
