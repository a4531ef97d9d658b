//! Domain Entities
//!
//! - `StackConfig` - the declarative deployment description
//! - `Workspace` - on-disk home of rendered artifacts and Terraform state
//! - `ServiceUrlCollection` - normalized Terraform outputs

mod service_registry;
mod stack_config;
mod workspace;

pub use service_registry::{
    DeploymentFamily, OutputMap, OutputValue, PostgresConnectionInfo, ServiceUrlCollection,
    VmAccess,
};
pub use stack_config::{
    param_keys, DeploymentConfig, Params, ProviderConfig, StackConfig, ToolBinding,
    ARTIFACT_TRACKING_STAGE, MLFLOW_TOOL,
};
pub use workspace::{
    Workspace, MAIN_TF, RENDER_FINGERPRINT_FILE, STATE_FILES, TFVARS, VARIABLES_TF,
    WORKSPACES_DIR,
};
