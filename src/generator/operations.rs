//! Operation-shape table.
//!
//! The usecase, request and response renderers never branch on an operation
//! directly: they read its [`OperationShape`] from [`OPERATION_SHAPES`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::naming::capitalize_first;
use crate::error::GenerateError;

/// CRUD-style behaviours that parameterize usecase/request/response rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
    Get,
    List,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Create,
        OperationKind::Update,
        OperationKind::Delete,
        OperationKind::Get,
        OperationKind::List,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::Get => "get",
            OperationKind::List => "list",
        }
    }

    /// `Create`, `Update`, ... as used in type names.
    pub fn class_form(self) -> String {
        capitalize_first(self.as_str())
    }

    pub fn shape(self) -> &'static OperationShape {
        match self {
            OperationKind::Create => &OPERATION_SHAPES[0],
            OperationKind::Update => &OPERATION_SHAPES[1],
            OperationKind::Delete => &OPERATION_SHAPES[2],
            OperationKind::Get => &OPERATION_SHAPES[3],
            OperationKind::List => &OPERATION_SHAPES[4],
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(OperationKind::Create),
            "update" => Ok(OperationKind::Update),
            "delete" => Ok(OperationKind::Delete),
            "get" | "read" => Ok(OperationKind::Get),
            "list" => Ok(OperationKind::List),
            other => Err(GenerateError::contract(format!(
                "unsupported operation '{other}' (expected create, update, delete, get/read or list)"
            ))),
        }
    }
}

/// What a use case hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// `(*entity.X, error)`
    Entity,
    /// `error`
    ErrorOnly,
    /// `([]*entity.X, int, error)`
    Page,
}

impl ReturnShape {
    pub fn signature(self, class: &str) -> String {
        match self {
            ReturnShape::Entity => format!("(*entity.{class}, error)"),
            ReturnShape::ErrorOnly => "error".to_string(),
            ReturnShape::Page => format!("([]*entity.{class}, int, error)"),
        }
    }

    /// Return statement prefix used when propagating an error.
    pub const fn error_prefix(self) -> &'static str {
        match self {
            ReturnShape::Entity => "nil, ",
            ReturnShape::ErrorOnly => "",
            ReturnShape::Page => "nil, 0, ",
        }
    }

    pub const fn mentions_entity(self) -> bool {
        !matches!(self, ReturnShape::ErrorOnly)
    }
}

/// Body template of a use case's `Execute` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCaseBody {
    /// validate, build through the entity constructor, persist
    CreateAndPersist,
    /// load by id and tenant, validate, mutate, persist
    LoadModifyPersist,
    /// load by id and tenant, delete
    LoadThenDelete,
    /// load by id and tenant
    LoadOne,
    /// load every record of the tenant and slice the requested page
    ListByTenant,
}

impl UseCaseBody {
    /// Bodies that translate a missing record into the NotFound error.
    pub const fn checks_existence(self) -> bool {
        matches!(
            self,
            UseCaseBody::LoadModifyPersist | UseCaseBody::LoadThenDelete | UseCaseBody::LoadOne
        )
    }
}

/// One field of a request DTO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestField {
    pub go_name: &'static str,
    pub go_type: &'static str,
    pub json: &'static str,
    pub binding: Option<&'static str>,
}

/// Everything operation-specific the renderers need.
#[derive(Debug, Clone, Copy)]
pub struct OperationShape {
    pub kind: OperationKind,
    /// Parameter list of `Execute` after `ctx context.Context`
    pub params: &'static str,
    pub returns: ReturnShape,
    /// Whether the use case carries the name validation helper
    pub validates: bool,
    pub body: UseCaseBody,
    pub request_fields: &'static [RequestField],
    /// List responses wrap the items in a paginated envelope
    pub paginated_response: bool,
}

const NAME_FIELD: RequestField = RequestField {
    go_name: "Name",
    go_type: "string",
    json: "name",
    binding: Some("required,min=3,max=100"),
};

pub const OPERATION_SHAPES: [OperationShape; 5] = [
    OperationShape {
        kind: OperationKind::Create,
        params: "tenantID, name string",
        returns: ReturnShape::Entity,
        validates: true,
        body: UseCaseBody::CreateAndPersist,
        request_fields: &[NAME_FIELD],
        paginated_response: false,
    },
    OperationShape {
        kind: OperationKind::Update,
        params: "id, tenantID string, name string, active bool",
        returns: ReturnShape::Entity,
        validates: true,
        body: UseCaseBody::LoadModifyPersist,
        request_fields: &[
            NAME_FIELD,
            RequestField {
                go_name: "Active",
                go_type: "bool",
                json: "active",
                binding: None,
            },
        ],
        paginated_response: false,
    },
    OperationShape {
        kind: OperationKind::Delete,
        params: "id, tenantID string",
        returns: ReturnShape::ErrorOnly,
        validates: false,
        body: UseCaseBody::LoadThenDelete,
        request_fields: &[],
        paginated_response: false,
    },
    OperationShape {
        kind: OperationKind::Get,
        params: "id, tenantID string",
        returns: ReturnShape::Entity,
        validates: false,
        body: UseCaseBody::LoadOne,
        request_fields: &[],
        paginated_response: false,
    },
    OperationShape {
        kind: OperationKind::List,
        params: "tenantID string, page, pageSize int",
        returns: ReturnShape::Page,
        validates: false,
        body: UseCaseBody::ListByTenant,
        request_fields: &[
            RequestField {
                go_name: "Page",
                go_type: "int",
                json: "page",
                binding: Some("min=1"),
            },
            RequestField {
                go_name: "PageSize",
                go_type: "int",
                json: "page_size",
                binding: Some("min=1,max=100"),
            },
            RequestField {
                go_name: "SortBy",
                go_type: "string",
                json: "sort_by",
                binding: None,
            },
            RequestField {
                go_name: "SortDir",
                go_type: "string",
                json: "sort_dir",
                binding: Some("omitempty,oneof=asc desc"),
            },
        ],
        paginated_response: true,
    },
];

/// Bounds enforced by the generated name validation helper.
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
