use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::naming::EntityDescriptor;
use super::operations::OperationKind;
use crate::error::{GenerateError, GenerateResult};

/// Directory of a module layer, relative to the module root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    DomainEntity,
    DomainPort,
    DomainException,
    DomainCriteria,
    ApplicationUsecase,
    ApplicationRequest,
    ApplicationResponse,
    ApplicationMapper,
    PersistenceRepository,
    InfrastructureController,
    TestMother,
    TestIntegration,
}

impl Layer {
    /// Layers created by module scaffolding, in creation order.
    pub const SCAFFOLD: [Layer; 8] = [
        Layer::DomainEntity,
        Layer::DomainPort,
        Layer::DomainException,
        Layer::ApplicationUsecase,
        Layer::ApplicationRequest,
        Layer::ApplicationResponse,
        Layer::PersistenceRepository,
        Layer::InfrastructureController,
    ];

    pub const fn rel_dir(self) -> &'static str {
        match self {
            Layer::DomainEntity => "domain/entity",
            Layer::DomainPort => "domain/port",
            Layer::DomainException => "domain/exception",
            Layer::DomainCriteria => "domain/criteria",
            Layer::ApplicationUsecase => "application/usecase",
            Layer::ApplicationRequest => "application/request",
            Layer::ApplicationResponse => "application/response",
            Layer::ApplicationMapper => "application/mapper",
            Layer::PersistenceRepository => "infrastructure/persistence/repository",
            Layer::InfrastructureController => "infrastructure/controller",
            Layer::TestMother => "test/mother",
            Layer::TestIntegration => "test/integration",
        }
    }
}

/// Whether an existing file at the target path may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Entity-scoped artifacts: regenerated on every call
    Overwrite,
    /// Module-shared artifacts: written only when absent
    CreateOnce,
}

/// Relative path of the module-shared exception file.
pub const EXCEPTION_FILE: &str = "domain/exception/errors.go";

/// Closed set of artifact kinds the engine can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Entity,
    Port,
    Usecase,
    Request,
    Response,
    Repository,
    Controller,
    CriteriaBuilder,
    Mapper,
    ObjectMother,
    IntegrationTest,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 11] = [
        ArtifactKind::Entity,
        ArtifactKind::Port,
        ArtifactKind::Usecase,
        ArtifactKind::Request,
        ArtifactKind::Response,
        ArtifactKind::Repository,
        ArtifactKind::Controller,
        ArtifactKind::CriteriaBuilder,
        ArtifactKind::Mapper,
        ArtifactKind::ObjectMother,
        ArtifactKind::IntegrationTest,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::Port => "port",
            ArtifactKind::Usecase => "usecase",
            ArtifactKind::Request => "request",
            ArtifactKind::Response => "response",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Controller => "controller",
            ArtifactKind::CriteriaBuilder => "criteria_builder",
            ArtifactKind::Mapper => "mapper",
            ArtifactKind::ObjectMother => "object_mother",
            ArtifactKind::IntegrationTest => "integration_test",
        }
    }

    pub const fn layer(self) -> Layer {
        match self {
            ArtifactKind::Entity => Layer::DomainEntity,
            ArtifactKind::Port => Layer::DomainPort,
            ArtifactKind::Usecase => Layer::ApplicationUsecase,
            ArtifactKind::Request => Layer::ApplicationRequest,
            ArtifactKind::Response => Layer::ApplicationResponse,
            ArtifactKind::Repository => Layer::PersistenceRepository,
            ArtifactKind::Controller => Layer::InfrastructureController,
            ArtifactKind::CriteriaBuilder => Layer::DomainCriteria,
            ArtifactKind::Mapper => Layer::ApplicationMapper,
            ArtifactKind::ObjectMother => Layer::TestMother,
            ArtifactKind::IntegrationTest => Layer::TestIntegration,
        }
    }

    /// Usecase, request and response rendering branches on the operation.
    pub const fn requires_operation(self) -> bool {
        matches!(
            self,
            ArtifactKind::Usecase | ArtifactKind::Request | ArtifactKind::Response
        )
    }

    pub const fn policy(self) -> WritePolicy {
        match self {
            ArtifactKind::Controller => WritePolicy::CreateOnce,
            _ => WritePolicy::Overwrite,
        }
    }

    pub fn missing_operation(self) -> GenerateError {
        GenerateError::contract(format!("operation_name is required to generate a {self}"))
    }

    /// Fail with an input contract violation when a required operation is absent.
    pub fn require_operation(
        self,
        operation: Option<OperationKind>,
    ) -> GenerateResult<Option<OperationKind>> {
        if self.requires_operation() && operation.is_none() {
            return Err(self.missing_operation());
        }
        Ok(operation)
    }

    /// File name of this artifact for the given entity.
    pub fn file_name(
        self,
        entity: &EntityDescriptor,
        operation: Option<OperationKind>,
    ) -> GenerateResult<String> {
        let name = &entity.name;
        let op = self.require_operation(operation)?.map(OperationKind::as_str);
        let file = match (self, op) {
            (ArtifactKind::Entity, _) => format!("{name}.go"),
            (ArtifactKind::Port, _) => format!("{name}_repository.go"),
            (ArtifactKind::Usecase, Some(op)) => format!("{op}_{name}.go"),
            (ArtifactKind::Request, Some(op)) => format!("{op}_{name}_request.go"),
            (ArtifactKind::Response, Some(op)) => format!("{op}_{name}_response.go"),
            (ArtifactKind::Repository, _) => format!("{name}_postgres_repository.go"),
            (ArtifactKind::Controller, _) => "http_handler.go".to_string(),
            (ArtifactKind::CriteriaBuilder, _) => format!("{name}_criteria.go"),
            (ArtifactKind::Mapper, _) => format!("{name}_mapper.go"),
            (ArtifactKind::ObjectMother, _) => format!("{name}_mother.go"),
            (ArtifactKind::IntegrationTest, _) => format!("{name}_test.go"),
            (kind, None) => return Err(kind.missing_operation()),
        };
        Ok(file)
    }

    /// Output path relative to the module root.
    pub fn relative_path(
        self,
        entity: &EntityDescriptor,
        operation: Option<OperationKind>,
    ) -> GenerateResult<PathBuf> {
        Ok(PathBuf::from(self.layer().rel_dir()).join(self.file_name(entity, operation)?))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ArtifactKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                GenerateError::contract(format!(
                    "unsupported component type '{s}' (expected one of: {})",
                    ArtifactKind::ALL.map(ArtifactKind::as_str).join(", ")
                ))
            })
    }
}
