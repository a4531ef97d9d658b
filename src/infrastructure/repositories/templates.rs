//! Template override directory
//!
//! Files laid out as `<dir>/<cloud>/<deployment_type>/<artifact>.tera`
//! replace built-in templates or add new families.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::services::{TemplateRenderer, ARTIFACTS};
use crate::error::DeploymlResult;

/// Register every override found under `dir`; returns how many were loaded.
/// A missing directory loads nothing.
pub fn load_template_overrides(renderer: &mut TemplateRenderer, dir: &Path) -> DeploymlResult<usize> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "no template override directory");
        return Ok(0);
    }

    let mut loaded = 0;
    for cloud in sorted_dirs(dir)? {
        for family in sorted_dirs(&cloud)? {
            for artifact in ARTIFACTS {
                let path = family.join(format!("{artifact}.tera"));
                if !path.is_file() {
                    continue;
                }
                let source = fs::read_to_string(&path)?;
                renderer.register_template(
                    &file_name(&cloud),
                    &file_name(&family),
                    artifact,
                    &source,
                )?;
                debug!(path = %path.display(), "registered template override");
                loaded += 1;
            }
        }
    }
    if loaded == 0 {
        warn!(dir = %dir.display(), "template override directory has no templates");
    }
    Ok(loaded)
}

fn sorted_dirs(dir: &Path) -> std::io::Result<Vec<std::path::PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeploymlError;
    use tempfile::tempdir;

    #[test]
    fn missing_directory_loads_nothing() {
        let dir = tempdir().unwrap();
        let mut renderer = TemplateRenderer::new().unwrap();

        let loaded = load_template_overrides(&mut renderer, &dir.path().join("none")).unwrap();

        assert_eq!(loaded, 0);
    }

    #[test]
    fn overrides_add_a_new_family() {
        let dir = tempdir().unwrap();
        let family = dir.path().join("aws/ecs");
        fs::create_dir_all(&family).unwrap();
        fs::write(family.join("main.tf.tera"), "# {{ name }}").unwrap();
        fs::write(family.join("variables.tf.tera"), "").unwrap();
        fs::write(family.join("terraform.tfvars.tera"), "").unwrap();
        fs::write(family.join("notes.txt"), "ignored").unwrap();
        let mut renderer = TemplateRenderer::new().unwrap();
        assert!(!renderer.has_family("aws", "ecs"));

        let loaded = load_template_overrides(&mut renderer, dir.path()).unwrap();

        assert_eq!(loaded, 3);
        assert!(renderer.has_family("aws", "ecs"));
    }

    #[test]
    fn broken_override_is_a_render_error() {
        let dir = tempdir().unwrap();
        let family = dir.path().join("gcp/cloud_run");
        fs::create_dir_all(&family).unwrap();
        fs::write(family.join("main.tf.tera"), "{% if %}").unwrap();
        let mut renderer = TemplateRenderer::new().unwrap();

        let err = load_template_overrides(&mut renderer, dir.path()).unwrap_err();

        assert!(matches!(err, DeploymlError::Render { .. }));
    }
}
