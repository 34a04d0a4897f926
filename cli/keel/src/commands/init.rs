//! `keel init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use keel_manifest::{ProjectManifest, MANIFEST_FILE};

/// Create a new Keel project in directory `name`, relative to cwd.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("project name must not be empty");
    }
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("targets")).context("creating targets/ directory")?;
    fs::write(
        project_dir.join(MANIFEST_FILE),
        ProjectManifest::template(name),
    )
    .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/targets/");

    Ok(())
}

#[cfg(test)]
mod tests {
    use keel_plan::{PlanBuilder, SettingsResolver};

    use super::*;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Arena");

        create_project(&project, "Arena").unwrap();

        assert!(project.join(MANIFEST_FILE).is_file());
        assert!(project.join("targets").is_dir());
    }

    #[test]
    fn init_generates_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Arena");
        create_project(&project, "Arena").unwrap();

        let manifest = ProjectManifest::load(&project.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.project.name, "Arena");
        assert!(manifest.targets.contains_key("Arena"));
    }

    #[test]
    fn init_names_that_are_not_bare_keys() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["My Game", "game.v2"] {
            let project = dir.path().join(name);
            create_project(&project, name).unwrap();

            let manifest = ProjectManifest::load(&project.join(MANIFEST_FILE)).unwrap();
            let store = manifest.descriptor_store(&project).unwrap();
            let graph = manifest.module_graph();
            let plan = PlanBuilder::new(&store, &graph, SettingsResolver::new(manifest.catalog().unwrap()))
                .build(name)
                .unwrap();
            assert_eq!(plan.ordered_modules, vec!["Core", name]);
        }
    }

    #[test]
    fn init_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create_project(&dir.path().join("blank"), " ").is_err());
    }

    #[test]
    fn init_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("existing");
        fs::create_dir(&project).unwrap();

        let err = create_project(&project, "existing").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
