//! `keel target` — target listing, description and scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use keel_manifest::{
    discover_targets, generate_template, load_target_toml, ProjectManifest, MANIFEST_FILE,
};

/// List every target in the project, inline and file-based.
pub fn list(project_dir: &Path, manifest: &ProjectManifest) -> Result<()> {
    let store = manifest.descriptor_store(project_dir)?;
    if store.is_empty() {
        println!("No targets defined. Use 'keel target new <name>' to add one.");
        return Ok(());
    }

    println!("Targets in '{}':", manifest.project.name);
    println!();
    for descriptor in store.iter() {
        println!(
            "  {:<25} {:<8} settings {:<6} include order {}",
            descriptor.name,
            descriptor.category.as_str(),
            descriptor.settings_version.to_string(),
            descriptor.include_order_version,
        );
    }
    println!();
    println!("Use 'keel target describe <name>' for details.");
    Ok(())
}

/// Describe one target: its declared fields and where it is defined.
pub fn describe(project_dir: &Path, manifest: &ProjectManifest, name: &str) -> Result<()> {
    let store = manifest.descriptor_store(project_dir)?;
    let Ok(descriptor) = store.get(name) else {
        bail!("unknown target: '{name}'. Use 'keel target list' to see available targets.");
    };
    let source = target_source(project_dir, manifest, name)?;

    println!("=== Target: {} ===", descriptor.name);
    println!("Defined in:    {source}");
    println!("Category:      {}", descriptor.category);
    println!("Settings:      {}", descriptor.settings_version);
    println!("Include order: {}", descriptor.include_order_version);
    println!();
    println!("--- Modules ({}) ---", descriptor.modules.len());
    for module in &descriptor.modules {
        println!("  {module}");
    }
    Ok(())
}

/// The file a target is defined in, relative to the project directory.
///
/// Target files are matched by the name they declare, which may differ from
/// their file stem.
fn target_source(project_dir: &Path, manifest: &ProjectManifest, name: &str) -> Result<String> {
    if manifest.targets.contains_key(name) {
        return Ok(MANIFEST_FILE.to_string());
    }
    for (_, path) in discover_targets(project_dir)? {
        if load_target_toml(&path)?.name == name {
            let shown = path.strip_prefix(project_dir).unwrap_or(&path);
            return Ok(shown.display().to_string());
        }
    }
    bail!("unknown target: '{name}'")
}

/// Write `targets/<name>.target.toml` from the default template.
///
/// The new target uses the project's newest catalog versions and links a
/// module the project already declares, when there is one.
pub fn new(project_dir: &Path, manifest: &ProjectManifest, name: &str) -> Result<()> {
    check_target_name(name)?;

    let store = manifest.descriptor_store(project_dir)?;
    if store.contains(name) {
        bail!("target '{name}' already exists. Use 'keel target describe {name}' to see it.");
    }
    let targets_dir = project_dir.join("targets");
    let path = targets_dir.join(format!("{name}.target.toml"));
    if path.exists() {
        bail!("target file '{}' already exists", path.display());
    }

    let graph = manifest.module_graph();
    let module = if graph.contains(name) {
        Some(name)
    } else if graph.contains(&manifest.project.name) {
        Some(manifest.project.name.as_str())
    } else {
        None
    };

    let catalog = manifest.catalog().context("reading [engine] versions")?;
    let body = generate_template(name, &catalog, module.unwrap_or(name))?;
    fs::create_dir_all(&targets_dir).context("creating targets/ directory")?;
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;

    println!("Created targets/{name}.target.toml");
    if module.is_none() {
        println!("Add a [modules.\"{name}\"] section to {MANIFEST_FILE} before planning it.");
    }
    Ok(())
}

/// A target name becomes a file name under `targets/`.
fn check_target_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("target name must not be empty");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        bail!("invalid target name '{name}': it must not contain path separators");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use keel_plan::{PlanBuilder, SettingsResolver};

    use super::*;

    fn project() -> (tempfile::TempDir, ProjectManifest) {
        let dir = tempfile::tempdir().unwrap();
        let manifest = ProjectManifest::parse(&ProjectManifest::template("Arena")).unwrap();
        (dir, manifest)
    }

    fn plan_modules(dir: &Path, manifest: &ProjectManifest, name: &str) -> Vec<String> {
        let store = manifest.descriptor_store(dir).unwrap();
        let graph = manifest.module_graph();
        let resolver = SettingsResolver::new(manifest.catalog().unwrap());
        PlanBuilder::new(&store, &graph, resolver)
            .build(name)
            .unwrap()
            .ordered_modules
    }

    #[test]
    fn list_and_describe_inline_target() {
        let (dir, manifest) = project();
        assert!(list(dir.path(), &manifest).is_ok());
        assert!(describe(dir.path(), &manifest, "Arena").is_ok());
        assert_eq!(target_source(dir.path(), &manifest, "Arena").unwrap(), "keel.toml");
    }

    #[test]
    fn describe_unknown_target() {
        let (dir, manifest) = project();
        let err = describe(dir.path(), &manifest, "Nope").unwrap_err();
        assert!(err.to_string().contains("unknown target"));
    }

    #[test]
    fn source_follows_declared_name() {
        let (dir, manifest) = project();
        let targets = dir.path().join("targets");
        fs::create_dir(&targets).unwrap();
        fs::write(
            targets.join("Custom.target.toml"),
            "name = \"Renamed\"\ncategory = \"server\"\nsettings-version = \"V2\"\ninclude-order-version = \"5.1\"\nmodules = [\"Core\"]\n",
        )
        .unwrap();

        let source = target_source(dir.path(), &manifest, "Renamed").unwrap();
        assert_eq!(Path::new(&source), Path::new("targets/Custom.target.toml"));
        assert!(describe(dir.path(), &manifest, "Renamed").is_ok());
    }

    #[test]
    fn new_target_resolves() {
        let (dir, manifest) = project();
        new(dir.path(), &manifest, "ArenaServer").unwrap();

        let path = dir.path().join("targets/ArenaServer.target.toml");
        let descriptor = load_target_toml(&path).unwrap();
        assert_eq!(descriptor.name, "ArenaServer");
        assert_eq!(descriptor.modules, vec!["Arena"]);

        assert_eq!(manifest.descriptor_store(dir.path()).unwrap().len(), 2);
        assert_eq!(plan_modules(dir.path(), &manifest, "ArenaServer"), vec!["Core", "Arena"]);
    }

    #[test]
    fn new_target_follows_project_catalog() {
        let (dir, mut manifest) = project();
        manifest.engine.settings_versions = Some(vec!["V1".into(), "V2".into()]);
        manifest.engine.include_order_versions = Some(vec!["Unreal5_1".into()]);
        new(dir.path(), &manifest, "Tools").unwrap();

        let descriptor = load_target_toml(&dir.path().join("targets/Tools.target.toml")).unwrap();
        assert_eq!(descriptor.settings_version.to_string(), "2.0");
        assert_eq!(descriptor.include_order_version.to_string(), "5.1");
        assert_eq!(plan_modules(dir.path(), &manifest, "Tools"), vec!["Core", "Arena"]);
    }

    #[test]
    fn new_prefers_module_named_after_target() {
        let (dir, manifest) = project();
        new(dir.path(), &manifest, "Core").unwrap();
        let descriptor = load_target_toml(&dir.path().join("targets/Core.target.toml")).unwrap();
        assert_eq!(descriptor.modules, vec!["Core"]);
    }

    #[test]
    fn new_refuses_inline_target() {
        let (dir, manifest) = project();
        let err = new(dir.path(), &manifest, "Arena").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(!dir.path().join("targets/Arena.target.toml").exists());
        assert!(manifest.descriptor_store(dir.path()).is_ok());
    }

    #[test]
    fn new_refuses_existing_file() {
        let (dir, manifest) = project();
        new(dir.path(), &manifest, "Tools").unwrap();
        let err = new(dir.path(), &manifest, "Tools").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn new_rejects_bad_names() {
        let (dir, manifest) = project();
        for name in ["  ", "../escape", "nested/name", "back\\slash", ".."] {
            assert!(new(dir.path(), &manifest, name).is_err(), "accepted {name:?}");
        }
        assert!(!dir.path().join("escape.target.toml").exists());
    }
}
