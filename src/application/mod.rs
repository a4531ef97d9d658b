//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - resolve, render, plan, confirm, apply, normalize outputs
//! - `DestroyUseCase` - confirm, pre-destroy cleanup, destroy, local cleanup
//! - `StatusUseCase` - render freshness and deployed endpoints
//! - `DoctorUseCase` - environment checks
//! - `InitUseCase` - cloud API enablement
//! - `default_stack` - starter stack config for `generate`
//!
//! ## Services
//!
//! - `ProvisioningDriver` - the Terraform lifecycle shared by deploy and destroy

pub mod deploy;
pub mod destroy;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod provisioning;
pub mod status;

#[cfg(test)]
mod test_support;

pub use deploy::{DeployOptions, DeployOutcome, DeployResult, DeployUseCase};
pub use destroy::{DestroyOptions, DestroyOutcome, DestroyResult, DestroyUseCase, PostDestroy};
pub use doctor::{CheckItem, CheckStatus, DoctorOptions, DoctorResult, DoctorUseCase};
pub use generate::{default_stack, GenerateOptions};
pub use init::{InitOutcome, InitUseCase};
pub use provisioning::{CleanupOutcome, ProvisioningDriver};
pub use status::{RenderState, StatusReport, StatusUseCase};
