//! Reusable stack configs and fake tool scripts.

/// Minimal cloud_run stack on GCP
pub const CLOUD_RUN_STACK: &str = r#"name: demo
provider:
  name: gcp
  project_id: p1
  region: us-west1
deployment:
  type: cloud_run
stack:
  - experiment_tracking:
      name: mlflow
      params:
        service_name: demo-mlflow-server
  - artifact_tracking:
      name: mlflow
      params:
        artifact_bucket: demo-artifacts-p1
        create_bucket: true
"#;

/// A provider deployml has no templates for
pub const UNSUPPORTED_TYPE_STACK: &str = r#"name: demo
provider:
  name: gcp
  project_id: p1
  region: us-west1
deployment:
  type: gke
stack:
  - experiment_tracking:
      name: mlflow
"#;

/// Terraform that plans three resources and exposes one service URL
pub const FAKE_TERRAFORM: &str = r#"echo "$@" >> "$(dirname "$0")/terraform.log"
case "$1" in
  init) echo "Terraform has been successfully initialized!" ;;
  plan) echo "Plan: 3 to add, 0 to change, 0 to destroy." ;;
  apply) echo "Apply complete! Resources: 3 added, 0 changed, 0 destroyed." ;;
  destroy) echo "Destroy complete! Resources: 3 destroyed." ;;
  output)
    if [ "$2" = "-json" ]; then
      echo '{"mlflow_url": {"value": "https://demo-mlflow.a.run.app", "sensitive": false, "type": "string"}}'
    else
      exit 1
    fi
    ;;
esac"#;

/// gcloud with an active account and no existing buckets
pub const FAKE_GCLOUD: &str = r#"echo "$@" >> "$(dirname "$0")/gcloud.log"
case "$1 $2" in
  "auth list") echo "ACTIVE  ACCOUNT"; echo "*       me@example.com" ;;
  "storage buckets") echo "ERROR: gs://bucket not found: 404" >&2; exit 1 ;;
  *) exit 0 ;;
esac"#;
