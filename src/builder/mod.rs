//! Source Set Builder
//!
//! Turns user-declared source-set specs (optional fields, as written in a
//! module's `docfold.toml`) into concrete [`SourceSet`]s.
//!
//! ## Rules
//!
//! - External link `url` is required; `package_list_url` defaults to `<url>/package-list`
//! - Links with `enabled = false` are dropped
//! - Source link `local_directory` and `remote_url` are required
//! - Local directories are rendered with `/` separators on every platform

mod module_file;

pub use module_file::{ModuleSpec, configure_module};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::constants::source_set::{DEFAULT_JDK_VERSION, PACKAGE_LIST_FILE};
use crate::types::{
    AnalysisPlatform, DocfoldError, ExternalDocumentationLink, Result, SourceLink, SourceSet,
    SourceSetId, Visibility,
};

/// Declared external documentation link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalLinkSpec {
    pub url: Option<String>,
    pub package_list_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Declared source link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceLinkSpec {
    pub local_directory: Option<PathBuf>,
    pub remote_url: Option<String>,
    pub remote_line_suffix: Option<String>,
}

/// Declared source set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSetSpec {
    pub name: String,
    pub display_name: Option<String>,
    pub source_roots: Vec<PathBuf>,
    pub classpath: Vec<PathBuf>,
    pub samples: Vec<PathBuf>,
    pub includes: Vec<PathBuf>,
    pub dependent_source_sets: Vec<String>,
    pub documented_visibilities: Vec<Visibility>,
    pub report_undocumented: bool,
    pub skip_empty_packages: Option<bool>,
    pub skip_deprecated: bool,
    pub jdk_version: Option<u32>,
    pub analysis_platform: Option<AnalysisPlatform>,
    pub external_documentation_links: Vec<ExternalLinkSpec>,
    pub source_links: Vec<SourceLinkSpec>,
    pub suppressed_files: Vec<PathBuf>,
    pub suppress: bool,
}

fn default_true() -> bool {
    true
}

/// Builds concrete source sets for one module
pub struct SourceSetBuilder;

impl SourceSetBuilder {
    /// Build every non-suppressed spec, in declaration order.
    ///
    /// Fails on the first spec with a missing required property.
    pub fn build_all(scope_id: &str, specs: &[SourceSetSpec]) -> Result<Vec<SourceSet>> {
        specs
            .iter()
            .filter(|spec| !spec.suppress)
            .map(|spec| Self::build(scope_id, spec))
            .collect()
    }

    fn build(scope_id: &str, spec: &SourceSetSpec) -> Result<SourceSet> {
        if spec.name.trim().is_empty() {
            return Err(DocfoldError::missing("name"));
        }

        let documented_visibilities = if spec.documented_visibilities.is_empty() {
            vec![Visibility::Public]
        } else {
            spec.documented_visibilities.clone()
        };

        let external_documentation_links = spec
            .external_documentation_links
            .iter()
            .filter(|link| link.enabled)
            .map(build_external_link)
            .collect::<Result<Vec<_>>>()?;

        let source_links = spec
            .source_links
            .iter()
            .map(build_source_link)
            .collect::<Result<Vec<_>>>()?;

        Ok(SourceSet {
            display_name: spec
                .display_name
                .clone()
                .unwrap_or_else(|| spec.name.clone()),
            source_set_id: SourceSetId::new(scope_id, &spec.name),
            source_roots: spec.source_roots.clone(),
            classpath: spec.classpath.clone(),
            samples: spec.samples.clone(),
            includes: spec.includes.clone(),
            dependent_source_sets: spec
                .dependent_source_sets
                .iter()
                .map(|name| SourceSetId::new(scope_id, name))
                .collect(),
            documented_visibilities,
            report_undocumented: spec.report_undocumented,
            skip_empty_packages: spec.skip_empty_packages.unwrap_or(true),
            skip_deprecated: spec.skip_deprecated,
            jdk_version: spec.jdk_version.unwrap_or(DEFAULT_JDK_VERSION),
            analysis_platform: spec.analysis_platform.unwrap_or_default(),
            external_documentation_links,
            source_links,
            suppressed_files: spec.suppressed_files.clone(),
        })
    }
}

fn parse_url(property: &str, value: &str) -> Result<Url> {
    Url::parse(value)
        .map_err(|e| DocfoldError::Config(format!("Invalid {} '{}': {}", property, value, e)))
}

fn build_external_link(spec: &ExternalLinkSpec) -> Result<ExternalDocumentationLink> {
    let raw_url = spec
        .url
        .as_deref()
        .ok_or_else(|| DocfoldError::missing("url"))?;
    let url = parse_url("url", raw_url)?;

    let package_list_url = match spec.package_list_url.as_deref() {
        Some(raw) => parse_url("packageListUrl", raw)?,
        None => default_package_list_url(&url)?,
    };

    Ok(ExternalDocumentationLink {
        url,
        package_list_url,
    })
}

/// `<url>/package-list`, tolerating a url without a trailing slash
fn default_package_list_url(url: &Url) -> Result<Url> {
    let base = if url.path().ends_with('/') {
        url.clone()
    } else {
        parse_url("url", &format!("{}/", url))?
    };
    base.join(PACKAGE_LIST_FILE)
        .map_err(|e| DocfoldError::Config(format!("Invalid packageListUrl: {}", e)))
}

fn build_source_link(spec: &SourceLinkSpec) -> Result<SourceLink> {
    let local_directory = spec
        .local_directory
        .as_deref()
        .ok_or_else(|| DocfoldError::missing("localDirectory"))?;
    let remote_url = spec
        .remote_url
        .as_deref()
        .ok_or_else(|| DocfoldError::missing("remoteUrl"))?;

    Ok(SourceLink {
        local_directory: invariant_separators_path(local_directory),
        remote_url: parse_url("remoteUrl", remote_url)?,
        remote_line_suffix: spec.remote_line_suffix.clone(),
    })
}

/// Path rendered with `/` separators regardless of platform
pub fn invariant_separators_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMOTE: &str = "https://github.com/example/docfold/";

    fn spec_named(name: &str) -> SourceSetSpec {
        SourceSetSpec {
            name: name.to_string(),
            ..SourceSetSpec::default()
        }
    }

    #[test]
    fn test_external_link_url_is_required() {
        let mut spec = spec_named("test1");
        spec.external_documentation_links.push(ExternalLinkSpec {
            url: None,
            package_list_url: Some(REMOTE.to_string()),
            enabled: true,
        });

        let err = SourceSetBuilder::build_all("core", &[spec]).unwrap_err();
        assert!(
            err.to_string()
                .contains("Cannot query the value of property 'url'")
        );
    }

    #[test]
    fn test_package_list_url_defaults_from_url() {
        let mut spec = spec_named("test2");
        spec.external_documentation_links.push(ExternalLinkSpec {
            url: Some("https://kotlinlang.org/api/core".to_string()),
            package_list_url: None,
            enabled: true,
        });

        let sets = SourceSetBuilder::build_all("core", &[spec]).unwrap();
        let link = &sets[0].external_documentation_links[0];
        assert_eq!(
            link.package_list_url.as_str(),
            "https://kotlinlang.org/api/core/package-list"
        );
    }

    #[test]
    fn test_disabled_link_is_dropped() {
        let mut spec = spec_named("test3");
        spec.external_documentation_links.push(ExternalLinkSpec {
            url: Some(REMOTE.to_string()),
            package_list_url: Some(REMOTE.to_string()),
            enabled: false,
        });

        let sets = SourceSetBuilder::build_all("core", &[spec]).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(sets[0].external_documentation_links.is_empty());
    }

    #[test]
    fn test_source_link_contains_all_properties() {
        let dir = tempfile::tempdir().unwrap();
        let mut spec = spec_named("testAllProperties");
        spec.source_links.push(SourceLinkSpec {
            local_directory: Some(dir.path().to_path_buf()),
            remote_url: Some(REMOTE.to_string()),
            remote_line_suffix: Some("%L".to_string()),
        });

        let sets = SourceSetBuilder::build_all("core", &[spec]).unwrap();
        let link = &sets[0].source_links[0];
        assert_eq!(link.remote_url.as_str(), REMOTE);
        assert_eq!(link.local_directory, invariant_separators_path(dir.path()));
        assert_eq!(link.remote_line_suffix.as_deref(), Some("%L"));
    }

    #[test]
    fn test_source_link_local_directory_is_required() {
        let mut spec = spec_named("testLocalDirRequired");
        spec.source_links.push(SourceLinkSpec {
            local_directory: None,
            remote_url: Some(REMOTE.to_string()),
            remote_line_suffix: Some("%L".to_string()),
        });

        let err = SourceSetBuilder::build_all("core", &[spec]).unwrap_err();
        assert!(err.to_string().contains("property 'localDirectory'"));
    }

    #[test]
    fn test_source_link_remote_url_is_required() {
        let mut spec = spec_named("testRemoteUrlRequired");
        spec.source_links.push(SourceLinkSpec {
            local_directory: Some(PathBuf::from("src")),
            remote_url: None,
            remote_line_suffix: Some("%L".to_string()),
        });

        let err = SourceSetBuilder::build_all("core", &[spec]).unwrap_err();
        assert!(err.to_string().contains("property 'remoteUrl'"));
    }

    #[test]
    fn test_remote_line_suffix_is_optional() {
        let mut spec = spec_named("testRemoteLineSuffixOptional");
        spec.source_links.push(SourceLinkSpec {
            local_directory: Some(PathBuf::from("src/main")),
            remote_url: Some(REMOTE.to_string()),
            remote_line_suffix: None,
        });

        let sets = SourceSetBuilder::build_all("core", &[spec]).unwrap();
        assert_eq!(sets[0].source_links[0].remote_line_suffix, None);
    }

    #[test]
    fn test_invariant_separators() {
        assert_eq!(
            invariant_separators_path(Path::new("a\\b\\c")),
            "a/b/c".to_string()
        );
    }

    #[test]
    fn test_defaults_and_suppression() {
        let mut hidden = spec_named("test");
        hidden.suppress = true;
        let mut main = spec_named("main");
        main.dependent_source_sets = vec!["common".to_string()];

        let sets = SourceSetBuilder::build_all("core", &[hidden, main]).unwrap();
        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.display_name, "main");
        assert_eq!(set.source_set_id, SourceSetId::new("core", "main"));
        assert_eq!(set.dependent_source_sets, vec![SourceSetId::new("core", "common")]);
        assert_eq!(set.documented_visibilities, vec![Visibility::Public]);
        assert_eq!(set.jdk_version, DEFAULT_JDK_VERSION);
        assert!(set.skip_empty_packages);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = SourceSetBuilder::build_all("core", &[SourceSetSpec::default()]).unwrap_err();
        assert!(matches!(err, DocfoldError::MissingValue { .. }));
    }
}
