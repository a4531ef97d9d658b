//! Deploy Use Case Tests

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::application::generate::{default_stack, GenerateOptions};
use crate::application::provisioning::ProvisioningDriver;
use crate::application::test_support::{
    MockCloud, MockProvisioner, MockRegistry, MockStore, ScriptedConfirmer,
};
use crate::domain::entities::{param_keys, StackConfig};
use crate::domain::ports::lifecycle_events::test_support::RecordingSink;
use crate::domain::ports::{LifecycleEvent, ToolOutput};
use crate::domain::services::TemplateRenderer;
use crate::domain::value_objects::LifecycleStep;
use crate::error::{DeploymlError, DeploymlResult};

const CLOUD_RUN: &str = r#"
name: demo
provider: { name: gcp, project_id: p1, region: us-west1 }
deployment: { type: cloud_run }
stack:
  - experiment_tracking:
      name: mlflow
      params: { allow_public_access: true }
  - artifact_tracking:
      name: mlflow
      params: {}
"#;

const PLAN: &str = "  # module.mlflow.google_cloud_run_service.service will be created\n";

const OUTPUTS: &str = r#"{
  "mlflow_url": {"value": "https://mlflow-abc.a.run.app", "sensitive": false, "type": "string"},
  "db_password": {"value": "hunter2", "sensitive": true, "type": "string"}
}"#;

struct Harness {
    provisioner: MockProvisioner,
    store: MockStore,
    registry: MockRegistry,
    cloud: MockCloud,
    confirmer: ScriptedConfirmer,
    events: RecordingSink,
    renderer: TemplateRenderer,
}

impl Harness {
    fn new(provisioner: MockProvisioner, answers: &[bool]) -> Self {
        let cloud = MockCloud::default();
        cloud.authenticated.set(true);
        Self {
            provisioner,
            store: MockStore::default(),
            registry: MockRegistry::default(),
            cloud,
            confirmer: ScriptedConfirmer::new(answers),
            events: RecordingSink::default(),
            renderer: TemplateRenderer::new().unwrap(),
        }
    }

    fn deploy(&self, yaml: &str) -> DeploymlResult<DeployResult> {
        self.deploy_config(StackConfig::from_yaml_str(yaml).unwrap())
    }

    fn deploy_config(&self, config: StackConfig) -> DeploymlResult<DeployResult> {
        let driver = ProvisioningDriver::new(
            &self.provisioner,
            &self.store,
            &self.confirmer,
            &self.events,
        );
        DeployUseCase::new(
            driver,
            &self.renderer,
            &self.registry,
            &self.cloud,
            &self.events,
        )
        .execute(DeployOptions::new(config, "/work"), StdRng::seed_from_u64(7))
    }
}

fn happy_provisioner() -> MockProvisioner {
    MockProvisioner::default()
        .respond(LifecycleStep::Plan, ToolOutput::ok(PLAN))
        .respond(LifecycleStep::Output, ToolOutput::ok(OUTPUTS))
}

#[test]
fn deploy_runs_every_step_in_order() {
    let h = Harness::new(happy_provisioner(), &[true]);

    let result = h.deploy(CLOUD_RUN).unwrap();

    assert!(result.is_applied());
    assert_eq!(
        h.provisioner.steps(),
        vec![
            LifecycleStep::Init,
            LifecycleStep::Plan,
            LifecycleStep::Apply,
            LifecycleStep::Output
        ]
    );
    assert_eq!(
        result.urls.tracking.as_deref(),
        Some("https://mlflow-abc.a.run.app")
    );
    assert_eq!(result.workspace.name(), "demo");
    assert_eq!(result.estimate.map(|e| e.minutes), Some(1));
}

#[test]
fn deploy_writes_rendered_artifacts_and_fingerprint() {
    let h = Harness::new(happy_provisioner(), &[true]);

    let result = h.deploy(CLOUD_RUN).unwrap();

    let written = h.store.written.borrow();
    let written = written.as_ref().expect("artifacts written");
    assert_eq!(written.fingerprint, result.fingerprint);
    assert!(written.tfvars.contains("project_id = \"p1\""));
    assert_eq!(h.store.prepared.get(), 1);
}

#[test]
fn declined_confirmation_cancels_without_apply() {
    let h = Harness::new(happy_provisioner(), &[false]);

    let result = h.deploy(CLOUD_RUN).unwrap();

    assert_eq!(result.outcome, DeployOutcome::Cancelled);
    assert_eq!(
        h.provisioner.steps(),
        vec![LifecycleStep::Init, LifecycleStep::Plan]
    );
    assert!(result.outputs.is_empty());
    assert!(h
        .events
        .events
        .borrow()
        .iter()
        .any(|e| matches!(e, LifecycleEvent::Cancelled)));
}

#[test]
fn plan_failure_aborts_before_confirmation() {
    let provisioner = MockProvisioner::default()
        .respond(LifecycleStep::Plan, ToolOutput::failed(1, "Error: bad provider"));
    let h = Harness::new(provisioner, &[true]);

    let err = h.deploy(CLOUD_RUN).unwrap_err();

    assert!(matches!(err, DeploymlError::PlanFailed { stderr } if stderr.contains("bad provider")));
    assert!(h.confirmer.asked.borrow().is_empty());
    assert!(!h.provisioner.steps().contains(&LifecycleStep::Apply));
}

#[test]
fn init_failure_is_not_fatal() {
    let provisioner = happy_provisioner()
        .respond(LifecycleStep::Init, ToolOutput::failed(1, "backend warning"));
    let h = Harness::new(provisioner, &[true]);

    let result = h.deploy(CLOUD_RUN).unwrap();

    assert!(result.is_applied());
}

#[test]
fn apply_failure_is_reported() {
    let provisioner = happy_provisioner()
        .respond(LifecycleStep::Apply, ToolOutput::failed(1, "quota exceeded"));
    let h = Harness::new(provisioner, &[true]);

    let err = h.deploy(CLOUD_RUN).unwrap_err();

    assert!(matches!(err, DeploymlError::ApplyFailed { code: Some(1), .. }));
    assert!(!h.provisioner.steps().contains(&LifecycleStep::Output));
}

#[test]
fn unreadable_outputs_do_not_fail_an_applied_deploy() {
    let provisioner = MockProvisioner::default()
        .respond(LifecycleStep::Plan, ToolOutput::ok(PLAN))
        .respond(LifecycleStep::Output, ToolOutput::failed(1, "no state"));
    let h = Harness::new(provisioner, &[true]);

    let result = h.deploy(CLOUD_RUN).unwrap();

    assert!(result.is_applied());
    assert!(result.urls.is_empty());
}

#[test]
fn unauthenticated_session_logs_in_and_sets_project() {
    let h = Harness::new(happy_provisioner(), &[true]);
    h.cloud.authenticated.set(false);

    h.deploy(CLOUD_RUN).unwrap();

    assert_eq!(
        *h.cloud.calls.borrow(),
        vec!["login".to_string(), "set_project p1".to_string()]
    );
}

#[test]
fn missing_bucket_is_generated_and_flagged_for_creation() {
    let h = Harness::new(happy_provisioner(), &[true]);

    let result = h.deploy(CLOUD_RUN).unwrap();

    let store = result
        .config
        .stack
        .iter()
        .find(|b| b.is_artifact_store())
        .unwrap();
    let bucket = store.param_str(param_keys::ARTIFACT_BUCKET).unwrap();
    assert!(bucket.contains("-bucket-p1-"), "{bucket}");
    assert_eq!(
        store.param_bool(param_keys::CREATE_ARTIFACT_BUCKET),
        Some(true)
    );
    assert!(h
        .events
        .events
        .borrow()
        .iter()
        .any(|e| matches!(e, LifecycleEvent::BucketGenerated { attempts: 1, .. })));
}

#[test]
fn generated_stack_provisions_its_bucket() {
    let h = Harness::new(happy_provisioner(), &[true]);
    let options = GenerateOptions {
        project_id: Some("p1".into()),
        ..GenerateOptions::default()
    };
    let config = default_stack(&options).unwrap();

    h.deploy_config(config).unwrap();

    let written = h.store.written.borrow();
    let main_tf = &written.as_ref().expect("artifacts written").main_tf;
    assert!(main_tf.contains("module \"artifact_bucket\""), "{main_tf}");
}

#[test]
fn caller_bucket_flag_false_skips_the_bucket_module() {
    let h = Harness::new(happy_provisioner(), &[true]);
    let yaml = CLOUD_RUN.replace("params: {}", "params: { create_bucket: false }");

    h.deploy(&yaml).unwrap();

    let written = h.store.written.borrow();
    let main_tf = &written.as_ref().expect("artifacts written").main_tf;
    assert!(!main_tf.contains("module \"artifact_bucket\""));
}

#[test]
fn escaping_workspace_override_is_rejected_before_terraform() {
    let h = Harness::new(happy_provisioner(), &[true]);
    let config = StackConfig::from_yaml_str(CLOUD_RUN).unwrap();
    let mut options = DeployOptions::new(config, "/work");
    options.workspace = Some("..".into());
    let driver = ProvisioningDriver::new(&h.provisioner, &h.store, &h.confirmer, &h.events);

    let err = DeployUseCase::new(driver, &h.renderer, &h.registry, &h.cloud, &h.events)
        .execute(options, StdRng::seed_from_u64(7))
        .unwrap_err();

    assert!(matches!(err, DeploymlError::InvalidWorkspaceName { .. }));
    assert!(h.provisioner.steps().is_empty());
    assert_eq!(h.store.prepared.get(), 0);
}

#[test]
fn missing_module_library_stops_before_terraform() {
    let mut h = Harness::new(happy_provisioner(), &[true]);
    h.store.missing_modules = true;

    let err = h.deploy(CLOUD_RUN).unwrap_err();

    assert!(matches!(err, DeploymlError::ModuleTemplatesMissing { .. }));
    assert!(h.provisioner.steps().is_empty());
}

#[test]
fn unknown_template_family_stops_before_terraform() {
    let h = Harness::new(happy_provisioner(), &[true]);
    let yaml = CLOUD_RUN.replace("type: cloud_run", "type: gke");

    let err = h.deploy(&yaml).unwrap_err();

    assert!(matches!(err, DeploymlError::TemplateNotFound { deployment_type, .. } if deployment_type == "gke"));
    assert!(h.provisioner.steps().is_empty());
    assert!(h.store.written.borrow().is_none());
}

#[test]
fn progress_ends_with_final_message() {
    let h = Harness::new(happy_provisioner(), &[true]);

    h.deploy(CLOUD_RUN).unwrap();

    let messages = h.events.progress_messages();
    assert_eq!(
        messages.last().map(String::as_str),
        Some("All done! Reviewing the results...")
    );
}
