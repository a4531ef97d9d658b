use deployml::DeploymlError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::ci::{github_actions_annotation, is_github_actions, AnnotationLevel};
use crate::ui::terminal::detect_capabilities;

fn error_block(err: &DeploymlError) -> ErrorBlock {
    match err {
        DeploymlError::ConfigNotFound { path } => ErrorBlock::new("Config file not found.")
            .with_file(path)
            .with_fix("Check the path, or create a starter config with `deployml generate`."),
        DeploymlError::InvalidConfig { file, message } => ErrorBlock::new(message.clone())
            .with_file(file)
            .with_fix("Fix the stack config and try again."),
        DeploymlError::InvalidWorkspaceName { .. } => ErrorBlock::new(err.to_string())
            .with_fix("Use a plain name such as `demo` for `name:` or --workspace."),
        DeploymlError::ProjectIdRequired { .. } => ErrorBlock::new(err.to_string())
            .with_fix("Pass --project-id or set provider.project_id in the stack config."),
        DeploymlError::TemplateNotFound { .. } => ErrorBlock::new(err.to_string())
            .with_fix("Use deployment type cloud_run or cloud_vm, or add templates under paths.templates_dir."),
        DeploymlError::ModuleTemplatesMissing { path } => {
            ErrorBlock::new("Terraform module library not found.")
                .with_file(path)
                .with_fix("Set paths.modules_dir or DEPLOYML_MODULES_DIR to the module library.")
        }
        DeploymlError::ToolMissing { tool } => ErrorBlock::new(err.to_string())
            .with_fix(format!("Install {tool}, then run `deployml doctor`.")),
        DeploymlError::PlanFailed { stderr } => {
            ErrorBlock::new("terraform plan failed; nothing was changed.").with_stderr(stderr)
        }
        DeploymlError::ApplyFailed { stderr, .. } => ErrorBlock::new(err.to_string())
            .with_stderr(stderr)
            .with_fix("The workspace was left intact. Fix the cause and run deploy again."),
        DeploymlError::DestroyFailed { stderr, .. } => ErrorBlock::new(
            "terraform destroy failed; some resources may still exist.",
        )
        .with_stderr(stderr)
        .with_fix("Inspect the workspace and finish the cleanup manually."),
        other => ErrorBlock::new(other.to_string()),
    }
}

fn error_file(err: &DeploymlError) -> Option<String> {
    match err {
        DeploymlError::ConfigNotFound { path } => Some(path.display().to_string()),
        DeploymlError::InvalidConfig { file, .. } => Some(file.display().to_string()),
        _ => None,
    }
}

pub fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    match err.downcast_ref::<DeploymlError>() {
        Some(deployml) => error_block(deployml).render(supports_color, supports_unicode),
        None => ErrorBlock::new(format!("{:#}", err)).render(supports_color, supports_unicode),
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = detect_capabilities();
    if caps.is_ci && is_github_actions() {
        let file = err.downcast_ref::<DeploymlError>().and_then(error_file);
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &err.to_string(),
                file.as_deref(),
                Some("DeployML"),
            )
        );
    }

    eprint!(
        "{}",
        format_error_with(err, caps.supports_color, caps.supports_unicode)
    );
}
