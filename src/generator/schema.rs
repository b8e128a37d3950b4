//! The persisted shape of a generated entity and its error taxonomy.
//!
//! [`ENTITY_FIELDS`] is the only place the field set is spelled out. Entity,
//! response, repository, mapper, object mother, criteria builder and
//! integration test renderers all iterate over it, so a column added here
//! shows up everywhere at once.

use serde::Serialize;

use super::naming::lower_first;

/// What a field means to the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Id,
    Tenant,
    Name,
    Active,
    CreatedAt,
    UpdatedAt,
}

/// Criteria operator a filterable field is matched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    Contains,
}

impl FilterOp {
    pub const fn go_constant(self) -> &'static str {
        match self {
            FilterOp::Equals => "EQUALS",
            FilterOp::Contains => "CONTAINS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub go_name: &'static str,
    pub go_type: &'static str,
    /// Column name, also the JSON wire name
    pub column: &'static str,
    pub role: FieldRole,
    /// Part of the `(id, tenant_id)` key every scoped query filters on
    pub key: bool,
    /// Written by UPDATE statements
    pub updatable: bool,
    pub filter: Option<FilterOp>,
}

pub const ENTITY_FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        go_name: "ID",
        go_type: "string",
        column: "id",
        role: FieldRole::Id,
        key: true,
        updatable: false,
        filter: None,
    },
    FieldSpec {
        go_name: "TenantID",
        go_type: "string",
        column: "tenant_id",
        role: FieldRole::Tenant,
        key: true,
        updatable: false,
        filter: Some(FilterOp::Equals),
    },
    FieldSpec {
        go_name: "Name",
        go_type: "string",
        column: "name",
        role: FieldRole::Name,
        key: false,
        updatable: true,
        filter: Some(FilterOp::Contains),
    },
    FieldSpec {
        go_name: "Active",
        go_type: "bool",
        column: "active",
        role: FieldRole::Active,
        key: false,
        updatable: true,
        filter: Some(FilterOp::Equals),
    },
    FieldSpec {
        go_name: "CreatedAt",
        go_type: "time.Time",
        column: "created_at",
        role: FieldRole::CreatedAt,
        key: false,
        updatable: false,
        filter: None,
    },
    FieldSpec {
        go_name: "UpdatedAt",
        go_type: "time.Time",
        column: "updated_at",
        role: FieldRole::UpdatedAt,
        key: false,
        updatable: true,
        filter: None,
    },
];

/// Comma-separated column list used by every SELECT and INSERT.
pub fn column_list() -> String {
    ENTITY_FIELDS
        .iter()
        .map(|f| f.column)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `$1, $2, ...` for every column.
pub fn insert_placeholders() -> String {
    (1..=ENTITY_FIELDS.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `id = $1 AND tenant_id = $2`: the tenant-scoped key predicate.
pub fn key_clause() -> String {
    ENTITY_FIELDS
        .iter()
        .filter(|f| f.key)
        .enumerate()
        .map(|(i, f)| format!("{} = ${}", f.column, i + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// A field pre-formatted for a template.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub go_name: String,
    pub column: String,
    /// Go name padded to the widest name (struct declarations)
    pub padded_name: String,
    /// Go type padded to the widest type (struct declarations)
    pub padded_type: String,
    /// `Name:` padded for composite literals
    pub padded_key: String,
    /// Value assigned by the entity constructor
    pub constructor_value: String,
    /// Value assigned by the object mother
    pub sample_value: String,
    /// Compared by the generated integration test after a round trip
    pub compared: bool,
}

/// Template views of [`ENTITY_FIELDS`] for an entity class.
pub fn field_views(class: &str) -> Vec<FieldView> {
    let name_width = ENTITY_FIELDS.iter().map(|f| f.go_name.len()).max().unwrap_or(0);
    let type_width = ENTITY_FIELDS.iter().map(|f| f.go_type.len()).max().unwrap_or(0);
    ENTITY_FIELDS
        .iter()
        .map(|f| FieldView {
            go_name: f.go_name.to_string(),
            column: f.column.to_string(),
            padded_name: format!("{:<name_width$}", f.go_name),
            padded_type: format!("{:<type_width$}", f.go_type),
            padded_key: format!("{:<width$}", format!("{}:", f.go_name), width = name_width + 1),
            constructor_value: constructor_value(f.role).to_string(),
            sample_value: sample_value(f.role, class),
            compared: matches!(
                f.role,
                FieldRole::Id | FieldRole::Tenant | FieldRole::Name | FieldRole::Active
            ),
        })
        .collect()
}

fn constructor_value(role: FieldRole) -> &'static str {
    match role {
        FieldRole::Id => "uuid.New().String()",
        FieldRole::Tenant => "tenantID",
        FieldRole::Name => "name",
        FieldRole::Active => "true",
        FieldRole::CreatedAt | FieldRole::UpdatedAt => "now",
    }
}

fn sample_value(role: FieldRole, class: &str) -> String {
    match role {
        FieldRole::Id => "uuid.New().String()".to_string(),
        FieldRole::Tenant => "\"test-tenant-id\"".to_string(),
        FieldRole::Name => format!("\"Test {class}\""),
        FieldRole::Active => "true".to_string(),
        FieldRole::CreatedAt | FieldRole::UpdatedAt => "time.Now()".to_string(),
    }
}

/// One assignment of an UPDATE statement.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: String,
    pub placeholder: String,
}

/// Key fields first (`$1`, `$2`), then updatable fields.
///
/// Returns the SET assignments and the Go field names in argument order.
pub fn update_statement() -> (Vec<Assignment>, Vec<String>) {
    let keys = ENTITY_FIELDS.iter().filter(|f| f.key);
    let updatable = ENTITY_FIELDS.iter().filter(|f| f.updatable);
    let args: Vec<String> = keys.chain(updatable).map(|f| f.go_name.to_string()).collect();
    let key_count = ENTITY_FIELDS.iter().filter(|f| f.key).count();
    let assignments = ENTITY_FIELDS
        .iter()
        .filter(|f| f.updatable)
        .enumerate()
        .map(|(i, f)| Assignment {
            column: f.column.to_string(),
            placeholder: format!("${}", key_count + i + 1),
        })
        .collect();
    (assignments, args)
}

/// A `With...` method of the generated criteria builder.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub method: String,
    pub param: String,
    pub go_type: String,
    pub column: String,
    pub operator: String,
}

pub fn filter_views() -> Vec<FilterView> {
    ENTITY_FIELDS
        .iter()
        .filter_map(|f| {
            f.filter.map(|op| FilterView {
                method: format!("With{}", f.go_name),
                param: lower_first(f.go_name),
                go_type: f.go_type.to_string(),
                column: f.column.to_string(),
                operator: op.go_constant().to_string(),
            })
        })
        .collect()
}

/// Fixed error taxonomy every persistence-touching renderer references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidName,
    NameRequired,
    NotFound,
    AlreadyExists,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorGroup {
    Validation,
    Business,
    Persistence,
}

impl ErrorGroup {
    pub const ALL: [ErrorGroup; 3] = [
        ErrorGroup::Validation,
        ErrorGroup::Business,
        ErrorGroup::Persistence,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            ErrorGroup::Validation => "Validation errors",
            ErrorGroup::Business => "Business errors",
            ErrorGroup::Persistence => "Persistence errors",
        }
    }
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::InvalidName,
        ErrorKind::NameRequired,
        ErrorKind::NotFound,
        ErrorKind::AlreadyExists,
        ErrorKind::CreateFailed,
        ErrorKind::UpdateFailed,
        ErrorKind::DeleteFailed,
    ];

    pub const fn suffix(self) -> &'static str {
        match self {
            ErrorKind::InvalidName => "InvalidName",
            ErrorKind::NameRequired => "NameRequired",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::CreateFailed => "CreateFailed",
            ErrorKind::UpdateFailed => "UpdateFailed",
            ErrorKind::DeleteFailed => "DeleteFailed",
        }
    }

    pub const fn group(self) -> ErrorGroup {
        match self {
            ErrorKind::InvalidName | ErrorKind::NameRequired => ErrorGroup::Validation,
            ErrorKind::NotFound | ErrorKind::AlreadyExists => ErrorGroup::Business,
            ErrorKind::CreateFailed | ErrorKind::UpdateFailed | ErrorKind::DeleteFailed => {
                ErrorGroup::Persistence
            }
        }
    }

    /// `Err{Class}{Kind}`
    pub fn ident(self, class: &str) -> String {
        format!("Err{class}{}", self.suffix())
    }

    pub fn message(self, entity: &str) -> String {
        match self {
            ErrorKind::InvalidName => format!("invalid {entity} name"),
            ErrorKind::NameRequired => format!("{entity} name is required"),
            ErrorKind::NotFound => format!("{entity} not found"),
            ErrorKind::AlreadyExists => format!("{entity} already exists"),
            ErrorKind::CreateFailed => format!("failed to create {entity}"),
            ErrorKind::UpdateFailed => format!("failed to update {entity}"),
            ErrorKind::DeleteFailed => format!("failed to delete {entity}"),
        }
    }
}

/// Fully qualified error identifiers for one entity class.
#[derive(Debug, Clone)]
pub struct ErrorIdents {
    pub invalid_name: String,
    pub name_required: String,
    pub not_found: String,
    pub create_failed: String,
    pub update_failed: String,
    pub delete_failed: String,
}

impl ErrorIdents {
    pub fn for_class(class: &str) -> Self {
        let q = |kind: ErrorKind| format!("exception.{}", kind.ident(class));
        ErrorIdents {
            invalid_name: q(ErrorKind::InvalidName),
            name_required: q(ErrorKind::NameRequired),
            not_found: q(ErrorKind::NotFound),
            create_failed: q(ErrorKind::CreateFailed),
            update_failed: q(ErrorKind::UpdateFailed),
            delete_failed: q(ErrorKind::DeleteFailed),
        }
    }
}
