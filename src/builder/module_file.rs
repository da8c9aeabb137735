//! Module spec file (`docfold.toml`) and the per-module configuration task
//!
//! Relative paths are resolved against the module directory, except the cache
//! root which is shared by all modules and resolved against the project root.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{SourceSetBuilder, SourceSetSpec, invariant_separators_path};
use crate::collector::discovery::configuration_path;
use crate::constants::layout::MODULE_FILE;
use crate::types::{ModuleConfiguration, ModuleId, Result, ResultExt};

/// Contents of a module's `docfold.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSpec {
    pub cache_root: Option<PathBuf>,
    pub plugins_classpath: Vec<PathBuf>,
    pub source_sets: Vec<SourceSetSpec>,
}

impl ModuleSpec {
    pub fn load(module_dir: &Path) -> Result<Self> {
        let path = module_dir.join(MODULE_FILE);
        let content = fs::read_to_string(&path)
            .with_context_fn(|| format!("Failed to read {}", path.display()))?;
        Ok(toml::from_str(&content)?)
    }

    /// Build the module configuration the generator consumes
    pub fn to_configuration(
        &self,
        module: &ModuleId,
        module_dir: &Path,
        project_root: &Path,
    ) -> Result<ModuleConfiguration> {
        let resolve = |p: &PathBuf| resolve_path(module_dir, p);
        let resolve_all = |paths: &[PathBuf]| paths.iter().map(resolve).collect::<Vec<_>>();

        let mut source_sets = SourceSetBuilder::build_all(module.as_str(), &self.source_sets)?;
        for set in &mut source_sets {
            set.source_roots = resolve_all(&set.source_roots);
            set.classpath = resolve_all(&set.classpath);
            set.samples = resolve_all(&set.samples);
            set.includes = resolve_all(&set.includes);
            set.suppressed_files = resolve_all(&set.suppressed_files);
            for link in &mut set.source_links {
                let local = resolve_path(module_dir, Path::new(&link.local_directory));
                link.local_directory = invariant_separators_path(&local);
            }
        }

        Ok(ModuleConfiguration {
            source_sets,
            plugins_classpath: resolve_all(&self.plugins_classpath),
            cache_root: self
                .cache_root
                .as_ref()
                .map(|root| resolve_path(project_root, root)),
        })
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Run the configuration task for one module: read its spec, build the
/// configuration and write it where the collector looks for it.
pub fn configure_module(
    project_root: &Path,
    module: &ModuleId,
    task_name: &str,
) -> Result<PathBuf> {
    let module_dir = project_root.join(module.as_str());
    debug!("Configuring module {} for task {}", module, task_name);

    let spec = ModuleSpec::load(&module_dir)?;
    let configuration = spec.to_configuration(module, &module_dir, project_root)?;

    let out = configuration_path(&module_dir, task_name);
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out, serde_json::to_string_pretty(&configuration)?)?;

    info!(
        module = %module,
        source_sets = configuration.source_sets.len(),
        "Wrote module configuration to {}",
        out.display()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MODULE_TOML: &str = r##"
cache_root = "cache"
plugins_classpath = ["plugins/base.jar", "/opt/plugins/mathjax.jar"]

[[source_sets]]
name = "main"
source_roots = ["src/main/kotlin"]
documented_visibilities = ["PUBLIC", "PROTECTED"]

[[source_sets.source_links]]
local_directory = "src/main/kotlin"
remote_url = "https://github.com/example/core/tree/main/src/main/kotlin"
remote_line_suffix = "#L"

[[source_sets]]
name = "test"
suppress = true
"##;

    fn project_with_module(name: &str, toml: &str) -> TempDir {
        let root = TempDir::new().unwrap();
        let module_dir = root.path().join(name);
        fs::create_dir_all(&module_dir).unwrap();
        fs::write(module_dir.join(MODULE_FILE), toml).unwrap();
        root
    }

    #[test]
    fn test_configure_writes_configuration() {
        let root = project_with_module("core", MODULE_TOML);
        let module = ModuleId::new("core");

        let out = configure_module(root.path(), &module, "docfoldHtml").unwrap();
        assert_eq!(
            out,
            root.path()
                .join("core/build/docfold/docfoldHtml/configuration.json")
        );

        let written: ModuleConfiguration =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written.cache_root, Some(root.path().join("cache")));
        assert_eq!(
            written.plugins_classpath,
            vec![
                root.path().join("core/plugins/base.jar"),
                PathBuf::from("/opt/plugins/mathjax.jar"),
            ]
        );
        assert_eq!(written.source_sets.len(), 1);
        let main = &written.source_sets[0];
        assert_eq!(main.source_set_id.scope_id, "core");
        assert_eq!(
            main.source_roots,
            vec![root.path().join("core/src/main/kotlin")]
        );
        assert_eq!(main.documented_visibilities.len(), 2);
        let link = &main.source_links[0];
        assert_eq!(link.remote_line_suffix.as_deref(), Some("#L"));
        assert!(Path::new(&link.local_directory).is_absolute());
        assert_eq!(
            link.local_directory,
            invariant_separators_path(&root.path().join("core/src/main/kotlin"))
        );
    }

    #[test]
    fn test_source_link_paths_resolve_like_source_roots() {
        let absolute = TempDir::new().unwrap();
        let toml = format!(
            r##"
[[source_sets]]
name = "main"
source_roots = ["src/main/java"]

[[source_sets.source_links]]
local_directory = "src/main/java"
remote_url = "https://github.com/example/io/tree/main/src/main/java"

[[source_sets.source_links]]
local_directory = "{}"
remote_url = "https://github.com/example/io/tree/main/generated"
"##,
            invariant_separators_path(absolute.path())
        );
        let root = project_with_module("io", &toml);

        let out = configure_module(root.path(), &ModuleId::new("io"), "docfoldHtml").unwrap();
        let written: ModuleConfiguration =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let main = &written.source_sets[0];

        let root_dir = invariant_separators_path(&main.source_roots[0]);
        assert_eq!(main.source_links[0].local_directory, root_dir);
        assert_eq!(
            main.source_links[1].local_directory,
            invariant_separators_path(absolute.path())
        );
    }

    #[test]
    fn test_package_list_url_default_survives_configuration() {
        let root = project_with_module(
            "net",
            "[[source_sets]]\nname = \"main\"\n[[source_sets.external_documentation_links]]\nurl = \"https://kotlinlang.org/api/kotlinx.coroutines\"\n",
        );

        let out = configure_module(root.path(), &ModuleId::new("net"), "docfoldHtml").unwrap();
        let written: ModuleConfiguration =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let link = &written.source_sets[0].external_documentation_links[0];
        assert_eq!(
            link.url.as_str(),
            "https://kotlinlang.org/api/kotlinx.coroutines"
        );
        assert_eq!(
            link.package_list_url.as_str(),
            "https://kotlinlang.org/api/kotlinx.coroutines/package-list"
        );
    }

    #[test]
    fn test_missing_module_file_is_error() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("empty")).unwrap();
        let result = configure_module(root.path(), &ModuleId::new("empty"), "docfoldHtml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_link_fails_configuration() {
        let root = project_with_module(
            "io",
            "[[source_sets]]\nname = \"main\"\n[[source_sets.external_documentation_links]]\npackage_list_url = \"https://example.com/package-list\"\n",
        );
        let err = configure_module(root.path(), &ModuleId::new("io"), "docfoldHtml").unwrap_err();
        assert!(err.to_string().contains("'url'"));
    }
}
