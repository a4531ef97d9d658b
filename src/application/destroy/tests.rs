//! Destroy Use Case Tests

use std::collections::HashMap;

use super::*;
use crate::application::provisioning::ProvisioningDriver;
use crate::application::test_support::{MockCloud, MockProvisioner, MockStore, ScriptedConfirmer};
use crate::domain::entities::Workspace;
use crate::domain::ports::lifecycle_events::test_support::RecordingSink;
use crate::domain::ports::{LifecycleEvent, ToolOutput};
use crate::domain::value_objects::LifecycleStep;
use crate::error::{DeploymlError, DeploymlResult};

const SQL_DESTROY_PLAN: &str = "\
  # module.postgres.google_sql_database_instance.main will be destroyed
  # module.mlflow.google_cloud_run_service.service will be destroyed
";

struct Harness {
    provisioner: MockProvisioner,
    store: MockStore,
    cloud: MockCloud,
    confirmer: ScriptedConfirmer,
    events: RecordingSink,
}

impl Harness {
    fn new(provisioner: MockProvisioner, answers: &[bool]) -> Self {
        Self {
            provisioner,
            store: MockStore {
                exists: true,
                ..Default::default()
            },
            cloud: MockCloud::default(),
            confirmer: ScriptedConfirmer::new(answers),
            events: RecordingSink::default(),
        }
    }

    fn destroy(&self, post_destroy: PostDestroy) -> DeploymlResult<DestroyResult> {
        let driver = ProvisioningDriver::new(
            &self.provisioner,
            &self.store,
            &self.confirmer,
            &self.events,
        );
        let options = DestroyOptions::new(Workspace::new("/work".as_ref(), "demo").unwrap())
            .with_project_id(Some("p1".to_string()))
            .with_post_destroy(post_destroy);
        DestroyUseCase::new(driver, &self.cloud, &self.cloud).execute(options)
    }
}

#[test]
fn absent_workspace_is_a_no_op() {
    let mut h = Harness::new(MockProvisioner::default(), &[true]);
    h.store.exists = false;

    let result = h.destroy(PostDestroy::default()).unwrap();

    assert_eq!(result.outcome, DestroyOutcome::Absent);
    assert!(h.provisioner.steps().is_empty());
    assert!(h.confirmer.asked.borrow().is_empty());
    assert!(h.cloud.calls.borrow().is_empty());
}

#[test]
fn declining_runs_nothing() {
    let h = Harness::new(MockProvisioner::default(), &[false]);

    let result = h.destroy(PostDestroy::default()).unwrap();

    assert_eq!(result.outcome, DestroyOutcome::Cancelled);
    assert!(h.provisioner.steps().is_empty());
    assert!(h.confirmer.asked.borrow()[0].contains("'demo'"));
}

#[test]
fn destroy_plans_then_destroys() {
    let h = Harness::new(MockProvisioner::default(), &[true, false]);

    let result = h.destroy(PostDestroy::OfferStateCleanup).unwrap();

    assert_eq!(result.outcome, DestroyOutcome::Destroyed);
    assert_eq!(
        h.provisioner.steps(),
        vec![LifecycleStep::PlanDestroy, LifecycleStep::Destroy]
    );
    assert_eq!(*h.cloud.calls.borrow(), vec!["set_project p1".to_string()]);
    assert!(!h.store.state_cleaned.get());
    assert!(!h.store.removed.get());
}

#[test]
fn plan_failure_stops_before_destroy() {
    let provisioner = MockProvisioner::default()
        .respond(LifecycleStep::PlanDestroy, ToolOutput::failed(1, "state locked"));
    let h = Harness::new(provisioner, &[true]);

    let err = h.destroy(PostDestroy::default()).unwrap_err();

    assert!(matches!(err, DeploymlError::PlanFailed { .. }));
    assert_eq!(h.provisioner.steps(), vec![LifecycleStep::PlanDestroy]);
}

#[test]
fn destroy_failure_leaves_workspace_alone() {
    let provisioner = MockProvisioner::default()
        .respond(LifecycleStep::Destroy, ToolOutput::failed(1, "dependency violation"));
    let h = Harness::new(provisioner, &[true, true]);

    let err = h.destroy(PostDestroy::RemoveWorkspace).unwrap_err();

    assert!(matches!(err, DeploymlError::DestroyFailed { code: Some(1), .. }));
    assert!(!h.store.removed.get());
    assert!(!h.store.state_cleaned.get());
}

#[test]
fn sql_instance_in_plan_drops_tracking_database_first() {
    let provisioner = MockProvisioner {
        raw_outputs: HashMap::from([(
            "instance_connection_name".to_string(),
            "p1:us-west1:mlflow-db".to_string(),
        )]),
        ..Default::default()
    }
    .respond(LifecycleStep::PlanDestroy, ToolOutput::ok(SQL_DESTROY_PLAN));
    let h = Harness::new(provisioner, &[true, false]);

    let result = h.destroy(PostDestroy::default()).unwrap();

    assert_eq!(result.database_cleanup.instance.as_deref(), Some("mlflow-db"));
    assert!(result.database_cleanup.database_dropped);
    assert!(result.database_cleanup.user_dropped);
    assert_eq!(
        *h.cloud.calls.borrow(),
        vec![
            "set_project p1".to_string(),
            "drop database mlflow on mlflow-db in p1".to_string(),
            "drop user mlflow on mlflow-db in p1".to_string(),
        ]
    );
    assert_eq!(result.estimate.map(|e| e.minutes), Some(1));
}

#[test]
fn failed_database_cleanup_does_not_block_destroy() {
    let provisioner = MockProvisioner {
        raw_outputs: HashMap::from([(
            "instance_connection_name".to_string(),
            "p1:us-west1:mlflow-db".to_string(),
        )]),
        ..Default::default()
    }
    .respond(LifecycleStep::PlanDestroy, ToolOutput::ok(SQL_DESTROY_PLAN));
    let mut h = Harness::new(provisioner, &[true, false]);
    h.cloud.failing = true;

    let result = h.destroy(PostDestroy::default()).unwrap();

    assert_eq!(result.outcome, DestroyOutcome::Destroyed);
    assert!(!result.database_cleanup.database_dropped);
    assert!(h.provisioner.steps().contains(&LifecycleStep::Destroy));
    let attempts = h
        .events
        .events
        .borrow()
        .iter()
        .filter(|e| matches!(e, LifecycleEvent::CleanupAttempted { success: false, .. }))
        .count();
    assert_eq!(attempts, 2);
}

#[test]
fn clean_workspace_removes_everything() {
    let h = Harness::new(MockProvisioner::default(), &[true]);

    let result = h.destroy(PostDestroy::RemoveWorkspace).unwrap();

    assert!(result.workspace_removed);
    assert!(h.store.removed.get());
    assert_eq!(h.confirmer.asked.borrow().len(), 1);
}

#[test]
fn accepted_state_cleanup_removes_state_files() {
    let h = Harness::new(MockProvisioner::default(), &[true, true]);

    let result = h.destroy(PostDestroy::OfferStateCleanup).unwrap();

    assert!(h.store.state_cleaned.get());
    assert_eq!(result.state_files_removed.len(), 4);
    assert_eq!(h.confirmer.asked.borrow()[1], STATE_CLEANUP_PROMPT);
}
