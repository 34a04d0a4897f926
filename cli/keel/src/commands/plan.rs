//! `keel plan` — resolve targets into build plans.

use std::path::Path;

use anyhow::{bail, Context, Result};
use keel_core::{DescriptorStore, VersionTag};
use keel_manifest::ProjectManifest;
use keel_plan::{BuildPlan, PlanBuilder, SettingsResolver};
use tracing::debug;

/// Output format for plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl Format {
    fn parse(format: Option<&str>) -> Result<Self> {
        match format.unwrap_or("text") {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => bail!("unknown format: '{other}'. Choose: text, json"),
        }
    }
}

/// Run the plan command.
pub fn run(
    project_dir: &Path,
    manifest: &ProjectManifest,
    target: Option<&str>,
    all: bool,
    floor: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let format = Format::parse(format)?;
    let store = manifest
        .descriptor_store(project_dir)
        .context("loading target descriptors")?;
    let graph = manifest.module_graph();
    let resolver = SettingsResolver::new(manifest.catalog().context("reading [engine] versions")?);

    let mut builder = PlanBuilder::new(&store, &graph, resolver);
    if let Some(floor) = resolve_floor(manifest, floor)? {
        builder = builder.with_settings_floor(floor);
    }

    let names = select_targets(&store, manifest, target, all)?;
    debug!(targets = ?names, floor = ?builder.settings_floor(), "planning");
    let mut plans = Vec::new();
    let mut failed = 0;
    for name in &names {
        match builder.build(name) {
            Ok(plan) => plans.push(plan),
            Err(e) if all => {
                eprintln!("error: target '{name}': {e}");
                failed += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("resolving target '{name}'")),
        }
    }

    print!("{}", render(&plans, format, all)?);

    if failed > 0 {
        bail!("{failed} of {} targets failed to resolve", names.len());
    }
    Ok(())
}

/// The `--floor` flag wins over `[engine] settings-floor`.
fn resolve_floor(manifest: &ProjectManifest, flag: Option<&str>) -> Result<Option<VersionTag>> {
    match flag {
        Some(text) => Ok(Some(text.parse().context("parsing --floor")?)),
        None => Ok(manifest
            .settings_floor()
            .context("parsing [engine] settings-floor")?),
    }
}

/// Pick which targets to resolve.
///
/// With no explicit target: the only target, else the one named after the
/// project.
fn select_targets(
    store: &DescriptorStore,
    manifest: &ProjectManifest,
    target: Option<&str>,
    all: bool,
) -> Result<Vec<String>> {
    if all {
        if store.is_empty() {
            bail!("--all: the project defines no targets");
        }
        return Ok(store.names().map(str::to_string).collect());
    }

    if let Some(name) = target {
        return Ok(vec![name.to_string()]);
    }

    if store.len() == 1 {
        return Ok(store.names().map(str::to_string).collect());
    }
    if store.contains(&manifest.project.name) {
        return Ok(vec![manifest.project.name.clone()]);
    }

    bail!(
        "no default target among {} targets. Name one, or use --all. Use 'keel target list' to see them.",
        store.len()
    )
}

fn render(plans: &[BuildPlan], format: Format, all: bool) -> Result<String> {
    match format {
        Format::Text => Ok(plans
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json if all => Ok(serde_json::to_string_pretty(plans)? + "\n"),
        Format::Json => match plans {
            [plan] => Ok(plan.to_json()? + "\n"),
            _ => Ok(serde_json::to_string_pretty(plans)? + "\n"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[project]
name = "Shooter"

[targets.Shooter]
category = "game"
settings-version = "V2"
include-order-version = "Unreal5_1"
modules = ["Shooter"]

[targets.ShooterServer]
category = "server"
settings-version = "V3"
include-order-version = "Unreal5_1"
modules = ["Shooter", "Online"]

[modules.Shooter]
dependencies = ["Core"]

[modules.Online]
dependencies = ["Core"]

[modules.Core]
"#;

    fn manifest() -> ProjectManifest {
        ProjectManifest::parse(MANIFEST).unwrap()
    }

    fn store(manifest: &ProjectManifest) -> DescriptorStore {
        let dir = tempfile::tempdir().unwrap();
        manifest.descriptor_store(dir.path()).unwrap()
    }

    #[test]
    fn format_parsing() {
        assert_eq!(Format::parse(None).unwrap(), Format::Text);
        assert_eq!(Format::parse(Some("json")).unwrap(), Format::Json);
        assert!(Format::parse(Some("yaml")).is_err());
    }

    #[test]
    fn select_explicit_target() {
        let m = manifest();
        let names = select_targets(&store(&m), &m, Some("ShooterServer"), false).unwrap();
        assert_eq!(names, vec!["ShooterServer"]);
    }

    #[test]
    fn select_defaults_to_project_name() {
        let m = manifest();
        let names = select_targets(&store(&m), &m, None, false).unwrap();
        assert_eq!(names, vec!["Shooter"]);
    }

    #[test]
    fn select_all_is_sorted() {
        let m = manifest();
        let names = select_targets(&store(&m), &m, None, true).unwrap();
        assert_eq!(names, vec!["Shooter", "ShooterServer"]);
    }

    #[test]
    fn select_without_default_fails() {
        let mut m = manifest();
        m.project.name = "Other".into();
        assert!(select_targets(&store(&m), &m, None, false).is_err());
    }

    #[test]
    fn floor_flag_overrides_manifest() {
        let mut m = manifest();
        m.engine.settings_floor = Some("V2".into());
        assert_eq!(
            resolve_floor(&m, Some("V4")).unwrap(),
            Some(VersionTag::new(4, 0, 0))
        );
        assert_eq!(resolve_floor(&m, None).unwrap(), Some(VersionTag::new(2, 0, 0)));
        assert!(resolve_floor(&m, Some("latest")).is_err());
    }

    #[test]
    fn render_single_json_plan() {
        let m = manifest();
        let s = store(&m);
        let graph = m.module_graph();
        let builder = PlanBuilder::new(&s, &graph, SettingsResolver::default());
        let plan = builder.build("ShooterServer").unwrap();

        let json = render(std::slice::from_ref(&plan), Format::Json, false).unwrap();
        let parsed: BuildPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ordered_modules, vec!["Core", "Shooter", "Online"]);

        let array = render(&[plan], Format::Json, true).unwrap();
        let parsed: Vec<BuildPlan> = serde_json::from_str(&array).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn run_in_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let m = manifest();
        assert!(run(dir.path(), &m, Some("Shooter"), false, None, None).is_ok());
        assert!(run(dir.path(), &m, None, true, Some("V3"), Some("json")).is_ok());
        assert!(run(dir.path(), &m, Some("Missing"), false, None, None).is_err());
    }
}
