//! Integration tests for `deployml deploy`.

mod common;

use common::*;

#[test]
fn deploy_missing_config_exits_1() {
    let env = TestEnv::new();

    let result = env.run(&["deploy", "-c", "nope.yaml", "--yes"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("Config file not found"),
        "{}",
        result.stderr
    );
    assert!(!env.project_path(".deployml").exists());
}

#[test]
fn deploy_invalid_config_names_the_problem() {
    let env = TestEnv::new();
    env.write_project_file("stack.yaml", "name: demo\nprovider: {name: gcp, region: us-west1}\ndeployment: {type: cloud_run}\n");

    let result = env.run(&["--json", "deploy", "-c", "stack.yaml"]);

    assert_eq!(result.exit_code, 1);
    let error = result.events().pop().unwrap();
    assert_eq!(error["event"], "error");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("provider.project_id is required"));
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;

    fn tool_env(env: &TestEnv) -> (String, String) {
        let terraform = env.fake_tool("terraform", FAKE_TERRAFORM);
        let gcloud = env.fake_tool("gcloud", FAKE_GCLOUD);
        (
            terraform.to_string_lossy().into_owned(),
            gcloud.to_string_lossy().into_owned(),
        )
    }

    fn terraform_log(env: &TestEnv) -> String {
        std::fs::read_to_string(env.home_dir.path().join("bin/terraform.log")).unwrap_or_default()
    }

    #[test]
    fn deploy_renders_applies_and_reports_services() {
        let env = TestEnv::new();
        env.write_project_file("stack.yaml", CLOUD_RUN_STACK);
        let (terraform, gcloud) = tool_env(&env);

        let result = env.run_with_env(
            &["--json", "deploy", "-c", "stack.yaml", "--yes"],
            &[
                ("DEPLOYML_TERRAFORM_BIN", &terraform),
                ("DEPLOYML_GCLOUD_BIN", &gcloud),
            ],
        );

        assert!(result.success, "{}", result.combined_output());
        let done = result.completion();
        assert_eq!(done["status"], "applied");
        assert_eq!(done["workspace"], "demo");
        assert_eq!(done["services"]["tracking"], "https://demo-mlflow.a.run.app");

        let tf_dir = env.project_path(".deployml/demo/terraform");
        assert!(tf_dir.join("main.tf").is_file());
        assert!(tf_dir.join("variables.tf").is_file());
        assert!(tf_dir.join("terraform.tfvars").is_file());
        assert!(tf_dir.join("modules/cloud_run_service/main.tf").is_file());

        let log = terraform_log(&env);
        let steps: Vec<&str> = log.lines().map(|l| l.split(' ').next().unwrap_or("")).collect();
        assert_eq!(steps, vec!["init", "plan", "apply", "output"], "{log}");

        let events = result.events();
        assert!(events.iter().any(|e| e["event"] == "estimate"));
    }

    #[test]
    fn deploy_without_yes_and_without_terminal_is_cancelled() {
        let env = TestEnv::new();
        env.write_project_file("stack.yaml", CLOUD_RUN_STACK);
        let (terraform, gcloud) = tool_env(&env);

        let result = env.run_with_env(
            &["--json", "deploy", "-c", "stack.yaml"],
            &[
                ("DEPLOYML_TERRAFORM_BIN", &terraform),
                ("DEPLOYML_GCLOUD_BIN", &gcloud),
            ],
        );

        assert!(result.success, "{}", result.combined_output());
        assert_eq!(result.completion()["status"], "cancelled");
        assert!(!terraform_log(&env).contains("apply"));
    }

    #[test]
    fn deploy_unknown_deployment_type_fails() {
        let env = TestEnv::new();
        env.write_project_file("stack.yaml", UNSUPPORTED_TYPE_STACK);
        let (terraform, gcloud) = tool_env(&env);

        let result = env.run_with_env(
            &["--json", "deploy", "-c", "stack.yaml", "--yes"],
            &[
                ("DEPLOYML_TERRAFORM_BIN", &terraform),
                ("DEPLOYML_GCLOUD_BIN", &gcloud),
            ],
        );

        assert_eq!(result.exit_code, 1);
        let error = result.events().pop().unwrap();
        assert!(error["message"].as_str().unwrap().contains("no templates"));
        assert!(terraform_log(&env).is_empty());
    }

    #[test]
    fn status_then_destroy_after_deploy() {
        let env = TestEnv::new();
        env.write_project_file("stack.yaml", CLOUD_RUN_STACK);
        let (terraform, gcloud) = tool_env(&env);
        let tools = [
            ("DEPLOYML_TERRAFORM_BIN", terraform.as_str()),
            ("DEPLOYML_GCLOUD_BIN", gcloud.as_str()),
        ];

        let deployed = env.run_with_env(&["--json", "deploy", "-c", "stack.yaml", "--yes"], &tools);
        assert!(deployed.success, "{}", deployed.combined_output());

        let status = env.run_with_env(&["--json", "status", "-c", "stack.yaml"], &tools);
        assert!(status.success, "{}", status.combined_output());
        let report = status.completion();
        assert_eq!(report["exists"], true);
        assert_eq!(report["render"], "current");
        assert_eq!(report["services"]["tracking"], "https://demo-mlflow.a.run.app");

        let destroyed = env.run_with_env(
            &["--json", "destroy", "-c", "stack.yaml", "--yes", "--clean-workspace"],
            &tools,
        );
        assert!(destroyed.success, "{}", destroyed.combined_output());
        let done = destroyed.completion();
        assert_eq!(done["status"], "destroyed");
        assert_eq!(done["workspace_removed"], true);
        assert!(!env.project_path(".deployml/demo").exists());
        assert!(terraform_log(&env).contains("destroy -auto-approve"));
    }
}
