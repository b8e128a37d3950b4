use askama::Template;

use super::kinds::{ArtifactKind, Layer};
use super::naming::{EntityDescriptor, ModuleContext};
use super::operations::{OperationKind, OperationShape, UseCaseBody, NAME_MAX_LEN, NAME_MIN_LEN};
use super::schema::{
    column_list, field_views, filter_views, insert_placeholders, key_clause, update_statement,
    Assignment, ErrorGroup, ErrorIdents, ErrorKind, FieldView, FilterView, ENTITY_FIELDS,
};
use crate::error::GenerateResult;

/// Everything a single artifact render depends on.
///
/// Rendering is pure: the same request always yields byte-identical output.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub kind: ArtifactKind,
    pub entity: &'a EntityDescriptor,
    pub module: &'a ModuleContext,
    pub operation: Option<OperationKind>,
    pub business_rules: &'a [String],
}

/// Name forms of the entity as the templates spell them.
#[derive(Debug, Clone)]
pub struct Names {
    /// Base form, as supplied
    pub entity: String,
    pub class: String,
    /// Table name and route segment
    pub plural: String,
    /// Go variable holding one instance
    pub var: String,
}

impl Names {
    pub fn new(entity: &EntityDescriptor) -> Self {
        Names {
            entity: entity.name.clone(),
            class: entity.class_form.clone(),
            plural: entity.plural(),
            var: entity.name.clone(),
        }
    }
}

/// Go import paths of the layers a template may reference.
#[derive(Debug, Clone)]
pub struct Imports {
    pub entity: String,
    pub exception: String,
    pub port: String,
    pub response: String,
    pub repository: String,
    pub mother: String,
    pub criteria: String,
    pub shared_criteria: String,
}

impl Imports {
    pub fn new(module: &ModuleContext) -> Self {
        Imports {
            entity: module.import_path(Layer::DomainEntity),
            exception: module.import_path(Layer::DomainException),
            port: module.import_path(Layer::DomainPort),
            response: module.import_path(Layer::ApplicationResponse),
            repository: module.import_path(Layer::PersistenceRepository),
            mother: module.import_path(Layer::TestMother),
            criteria: module.shared_domain_criteria(),
            shared_criteria: module.shared_infrastructure_criteria(),
        }
    }
}

/// A struct field with its columns padded the way gofmt aligns them.
#[derive(Debug, Clone)]
pub struct StructField {
    pub name: String,
    pub ty: String,
    pub tag: String,
}

fn aligned(rows: Vec<(String, String, String)>) -> Vec<StructField> {
    let name_width = rows.iter().map(|(n, _, _)| n.len()).max().unwrap_or(0);
    let type_width = rows.iter().map(|(_, t, _)| t.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(name, ty, tag)| StructField {
            name: format!("{name:<name_width$}"),
            ty: format!("{ty:<type_width$}"),
            tag,
        })
        .collect()
}

fn entity_struct_fields() -> Vec<StructField> {
    aligned(
        ENTITY_FIELDS
            .iter()
            .map(|f| {
                (
                    f.go_name.to_string(),
                    f.go_type.to_string(),
                    format!("json:\"{}\"", f.column),
                )
            })
            .collect(),
    )
}

fn request_struct_fields(shape: &OperationShape) -> Vec<StructField> {
    aligned(
        shape
            .request_fields
            .iter()
            .map(|f| {
                let tag = match f.binding {
                    Some(binding) => format!("json:\"{}\" binding:\"{binding}\"", f.json),
                    None => format!("json:\"{}\"", f.json),
                };
                (f.go_name.to_string(), f.go_type.to_string(), tag)
            })
            .collect(),
    )
}

fn page_struct_fields(class: &str) -> Vec<StructField> {
    let row = |name: &str, ty: String, json: &str| (name.to_string(), ty, format!("json:\"{json}\""));
    aligned(vec![
        row("Items", format!("[]*{class}Response"), "items"),
        row("TotalCount", "int".to_string(), "total_count"),
        row("Page", "int".to_string(), "page"),
        row("PageSize", "int".to_string(), "page_size"),
        row("TotalPages", "int".to_string(), "total_pages"),
    ])
}

#[derive(Template)]
#[template(path = "go/entity.go.txt", escape = "none")]
struct EntityTemplate {
    n: Names,
    fields: Vec<FieldView>,
}

#[derive(Template)]
#[template(path = "go/port.go.txt", escape = "none")]
struct PortTemplate {
    n: Names,
    imports: Imports,
}

#[derive(Template)]
#[template(path = "go/repository.go.txt", escape = "none")]
struct RepositoryTemplate {
    n: Names,
    imports: Imports,
    errors: ErrorIdents,
    fields: Vec<FieldView>,
    columns: String,
    placeholders: String,
    key_clause: String,
    assignments: Vec<Assignment>,
    update_args: Vec<String>,
}

#[derive(Template)]
#[template(path = "go/controller.go.txt", escape = "none")]
struct ControllerTemplate {
    n: Names,
    module: String,
    imports: Imports,
}

#[derive(Template)]
#[template(path = "go/usecase.go.txt", escape = "none")]
struct UsecaseTemplate {
    n: Names,
    imports: Imports,
    errors: ErrorIdents,
    operation: OperationKind,
    type_name: String,
    params: &'static str,
    returns: String,
    err_prefix: &'static str,
    body: UseCaseBody,
    checks_existence: bool,
    validates: bool,
    imports_entity: bool,
    imports_exception: bool,
    rules: Vec<String>,
    name_min: usize,
    name_max: usize,
}

#[derive(Template)]
#[template(path = "go/request.go.txt", escape = "none")]
struct RequestTemplate {
    n: Names,
    operation: OperationKind,
    type_name: String,
    fields: Vec<StructField>,
}

#[derive(Template)]
#[template(path = "go/response.go.txt", escape = "none")]
struct ResponseTemplate {
    n: Names,
    operation: OperationKind,
    type_name: String,
    paginated: bool,
    fields: Vec<StructField>,
    page_fields: Vec<StructField>,
}

#[derive(Template)]
#[template(path = "go/criteria.go.txt", escape = "none")]
struct CriteriaTemplate {
    n: Names,
    imports: Imports,
    filters: Vec<FilterView>,
}

#[derive(Template)]
#[template(path = "go/mapper.go.txt", escape = "none")]
struct MapperTemplate {
    n: Names,
    imports: Imports,
    fields: Vec<FieldView>,
}

#[derive(Template)]
#[template(path = "go/mother.go.txt", escape = "none")]
struct MotherTemplate {
    n: Names,
    imports: Imports,
    fields: Vec<FieldView>,
}

#[derive(Template)]
#[template(path = "go/integration_test.go.txt", escape = "none")]
struct IntegrationTestTemplate {
    n: Names,
    imports: Imports,
    errors: ErrorIdents,
    fields: Vec<FieldView>,
}

#[derive(Debug, Clone)]
struct ErrorEntry {
    padded_ident: String,
    message: String,
}

#[derive(Debug, Clone)]
struct ErrorGroupView {
    title: &'static str,
    entries: Vec<ErrorEntry>,
}

#[derive(Template)]
#[template(path = "go/exception.go.txt", escape = "none")]
struct ExceptionTemplate {
    groups: Vec<ErrorGroupView>,
}

/// Render one artifact kind.
///
/// # Errors
///
/// `InputContractViolation` when `usecase`, `request` or `response` is
/// requested without an operation; `Render` when a template fails.
pub fn render_artifact(req: &RenderRequest<'_>) -> GenerateResult<String> {
    req.kind.require_operation(req.operation)?;
    let n = Names::new(req.entity);
    let class = n.class.clone();
    let imports = Imports::new(req.module);
    let rendered = match req.kind {
        ArtifactKind::Entity => EntityTemplate {
            n,
            fields: field_views(&class),
        }
        .render()?,
        ArtifactKind::Port => PortTemplate { n, imports }.render()?,
        ArtifactKind::Repository => {
            let (assignments, update_args) = update_statement();
            RepositoryTemplate {
                n,
                imports,
                errors: ErrorIdents::for_class(&class),
                fields: field_views(&class),
                columns: column_list(),
                placeholders: insert_placeholders(),
                key_clause: key_clause(),
                assignments,
                update_args,
            }
            .render()?
        }
        ArtifactKind::Controller => ControllerTemplate {
            n,
            module: req.module.module_name.clone(),
            imports,
        }
        .render()?,
        ArtifactKind::Usecase => {
            let op = req.operation.ok_or_else(|| req.kind.missing_operation())?;
            let shape = op.shape();
            UsecaseTemplate {
                type_name: format!("{}{class}", op.class_form()),
                returns: shape.returns.signature(&class),
                err_prefix: shape.returns.error_prefix(),
                params: shape.params,
                body: shape.body,
                checks_existence: shape.body.checks_existence(),
                validates: shape.validates,
                imports_entity: shape.returns.mentions_entity()
                    || shape.body == UseCaseBody::CreateAndPersist,
                imports_exception: shape.validates || shape.body.checks_existence(),
                rules: req.business_rules.to_vec(),
                name_min: NAME_MIN_LEN,
                name_max: NAME_MAX_LEN,
                errors: ErrorIdents::for_class(&class),
                operation: op,
                n,
                imports,
            }
            .render()?
        }
        ArtifactKind::Request => {
            let op = req.operation.ok_or_else(|| req.kind.missing_operation())?;
            RequestTemplate {
                type_name: format!("{}{class}", op.class_form()),
                fields: request_struct_fields(op.shape()),
                operation: op,
                n,
            }
            .render()?
        }
        ArtifactKind::Response => {
            let op = req.operation.ok_or_else(|| req.kind.missing_operation())?;
            ResponseTemplate {
                type_name: format!("{}{class}", op.class_form()),
                paginated: op.shape().paginated_response,
                fields: entity_struct_fields(),
                page_fields: page_struct_fields(&class),
                operation: op,
                n,
            }
            .render()?
        }
        ArtifactKind::CriteriaBuilder => CriteriaTemplate {
            n,
            imports,
            filters: filter_views(),
        }
        .render()?,
        ArtifactKind::Mapper => MapperTemplate {
            n,
            imports,
            fields: field_views(&class),
        }
        .render()?,
        ArtifactKind::ObjectMother => MotherTemplate {
            n,
            imports,
            fields: field_views(&class),
        }
        .render()?,
        ArtifactKind::IntegrationTest => IntegrationTestTemplate {
            n,
            imports,
            errors: ErrorIdents::for_class(&class),
            fields: field_views(&class),
        }
        .render()?,
    };
    Ok(finish(rendered))
}

/// Render the module-shared exception file.
///
/// Declares the seven error kinds for every entity given, grouped by
/// validation, business and persistence.
pub fn render_exceptions(entities: &[EntityDescriptor]) -> GenerateResult<String> {
    let groups = ErrorGroup::ALL
        .into_iter()
        .map(|group| {
            let raw: Vec<(String, String)> = entities
                .iter()
                .flat_map(|entity| {
                    ErrorKind::ALL
                        .into_iter()
                        .filter(move |kind| kind.group() == group)
                        .map(move |kind| (kind.ident(&entity.class_form), kind.message(&entity.name)))
                })
                .collect();
            let width = raw.iter().map(|(ident, _)| ident.len()).max().unwrap_or(0);
            ErrorGroupView {
                title: group.title(),
                entries: raw
                    .into_iter()
                    .map(|(ident, message)| ErrorEntry {
                        padded_ident: format!("{ident:<width$}"),
                        message,
                    })
                    .collect(),
            }
        })
        .collect();
    Ok(finish(ExceptionTemplate { groups }.render()?))
}

/// Normalize trailing whitespace so every artifact ends in exactly one newline.
pub(crate) fn finish(rendered: String) -> String {
    let mut out = rendered.trim_end().to_string();
    out.push('\n');
    out
}
