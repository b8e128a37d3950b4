//! Identifier derivation shared by every renderer.

use std::path::Path;

use super::kinds::Layer;

/// Canonical name forms of the entity being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Base form exactly as supplied (used for file names, variables and tables)
    pub name: String,
    /// Type name: separators stripped, first character upper-cased
    pub class_form: String,
}

impl EntityDescriptor {
    /// Derive the descriptor from a raw entity name.
    ///
    /// `class_form` is a cosmetic transform, not title-casing:
    /// `product_variant` becomes `Productvariant`. An empty name yields empty
    /// identifiers rather than an error.
    pub fn derive(raw: &str) -> Self {
        EntityDescriptor {
            name: raw.to_string(),
            class_form: class_form(raw),
        }
    }

    /// Table and route segment name (`{name}s`).
    pub fn plural(&self) -> String {
        format!("{}s", self.name)
    }
}

/// Strip `_` separators and upper-case the first remaining character.
pub fn class_form(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| *c != '_').collect();
    capitalize_first(&stripped)
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive the import root of a service from its path.
///
/// The prefix and suffix are only stripped when both are present
/// (`saas-mt-pim-service` becomes `pim`); otherwise the last path component
/// is returned unchanged.
pub fn derive_service_name(service_path: &str, prefix: &str, suffix: &str) -> String {
    let base = Path::new(service_path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(service_path);
    match base
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
    {
        Some(core) if !core.is_empty() => core.to_string(),
        _ => base.to_string(),
    }
}

/// Where a module lives and how generated code refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    pub service_path: String,
    pub service_name: String,
    pub module_name: String,
    /// Source directory between the service and its modules (`src`)
    pub source_dir: String,
    /// Import root of the shared criteria packages (`pim/src/shared`)
    pub shared_import_root: String,
}

impl ModuleContext {
    /// Go import path of a module layer.
    ///
    /// Uses the same [`Layer::rel_dir`] the materializer writes to, so a
    /// generated import always resolves to where the artifact is written.
    pub fn import_path(&self, layer: Layer) -> String {
        format!(
            "{}/{}/{}/{}",
            self.service_name,
            self.source_dir,
            self.module_name,
            layer.rel_dir()
        )
    }

    pub fn shared_domain_criteria(&self) -> String {
        format!("{}/domain/criteria", self.shared_import_root)
    }

    pub fn shared_infrastructure_criteria(&self) -> String {
        format!("{}/infrastructure/criteria", self.shared_import_root)
    }
}
