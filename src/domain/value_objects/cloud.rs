//! Cloud value object - which provider a stack targets

use serde::{Deserialize, Serialize};

/// Service APIs a GCP project needs before the first deploy
pub const REQUIRED_GCP_APIS: &[&str] = &[
    "cloudresourcemanager.googleapis.com",
    "iam.googleapis.com",
    "compute.googleapis.com",
    "run.googleapis.com",
    "sqladmin.googleapis.com",
    "storage.googleapis.com",
    "artifactregistry.googleapis.com",
    "cloudbuild.googleapis.com",
    "servicenetworking.googleapis.com",
    "cloudscheduler.googleapis.com",
];

/// Cloud provider named under `provider.name` in a stack config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    /// Google Cloud Platform
    Gcp,
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
}

impl Cloud {
    /// Identifier used in config files and template paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Cloud::Gcp => "gcp",
            Cloud::Aws => "aws",
            Cloud::Azure => "azure",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Cloud::Gcp => "Google Cloud",
            Cloud::Aws => "AWS",
            Cloud::Azure => "Azure",
        }
    }

    /// GCP is the only provider whose project must be named explicitly
    pub fn requires_project_id(&self) -> bool {
        matches!(self, Cloud::Gcp)
    }
}

impl std::fmt::Display for Cloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_deserializes_lowercase() {
        let cloud: Cloud = serde_yaml_ng::from_str("gcp").unwrap();
        assert_eq!(cloud, Cloud::Gcp);
    }

    #[test]
    fn cloud_rejects_unknown_provider() {
        let result: Result<Cloud, _> = serde_yaml_ng::from_str("digitalocean");
        assert!(result.is_err());
    }

    #[test]
    fn only_gcp_requires_project_id() {
        assert!(Cloud::Gcp.requires_project_id());
        assert!(!Cloud::Aws.requires_project_id());
        assert!(!Cloud::Azure.requires_project_id());
    }
}
