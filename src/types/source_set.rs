//! Source Set Types
//!
//! Concrete source-set parameters as the generator consumes them.
//! Serialized with camelCase keys, the generator's native parameter names.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Identity of a source set: the owning module plus the set's own name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSetId {
    pub scope_id: String,
    pub source_set_name: String,
}

impl SourceSetId {
    pub fn new(scope_id: impl Into<String>, source_set_name: impl Into<String>) -> Self {
        Self {
            scope_id: scope_id.into(),
            source_set_name: source_set_name.into(),
        }
    }
}

impl std::fmt::Display for SourceSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.scope_id, self.source_set_name)
    }
}

/// Declaration visibility levels the generator can document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Internal,
    Package,
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            "internal" => Ok(Visibility::Internal),
            "package" => Ok(Visibility::Package),
            _ => Err(format!(
                "Unknown visibility: {}. Valid values: public, private, protected, internal, package",
                s
            )),
        }
    }
}

/// Platform the sources of a set are analysed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPlatform {
    #[default]
    Jvm,
    Js,
    Wasm,
    Native,
    Common,
}

/// Link to documentation hosted elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDocumentationLink {
    pub url: Url,
    pub package_list_url: Url,
}

/// Mapping from a local source directory to browsable remote sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLink {
    /// Local directory with `/` separators on every platform
    pub local_directory: String,
    pub remote_url: Url,
    pub remote_line_suffix: Option<String>,
}

/// One source set of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSet {
    pub display_name: String,
    #[serde(rename = "sourceSetID")]
    pub source_set_id: SourceSetId,
    pub source_roots: Vec<PathBuf>,
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
    #[serde(default)]
    pub samples: Vec<PathBuf>,
    #[serde(default)]
    pub includes: Vec<PathBuf>,
    #[serde(default)]
    pub dependent_source_sets: Vec<SourceSetId>,
    #[serde(default)]
    pub documented_visibilities: Vec<Visibility>,
    #[serde(default)]
    pub report_undocumented: bool,
    #[serde(default)]
    pub skip_empty_packages: bool,
    #[serde(default)]
    pub skip_deprecated: bool,
    pub jdk_version: u32,
    #[serde(default)]
    pub analysis_platform: AnalysisPlatform,
    #[serde(default)]
    pub external_documentation_links: Vec<ExternalDocumentationLink>,
    #[serde(default)]
    pub source_links: Vec<SourceLink>,
    #[serde(default)]
    pub suppressed_files: Vec<PathBuf>,
}

impl SourceSet {
    /// Minimal source set with generator defaults, used by callers that
    /// assemble configurations in code
    pub fn new(scope_id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            source_set_id: SourceSetId::new(scope_id, name),
            source_roots: Vec::new(),
            classpath: Vec::new(),
            samples: Vec::new(),
            includes: Vec::new(),
            dependent_source_sets: Vec::new(),
            documented_visibilities: vec![Visibility::Public],
            report_undocumented: false,
            skip_empty_packages: true,
            skip_deprecated: false,
            jdk_version: crate::constants::source_set::DEFAULT_JDK_VERSION,
            analysis_platform: AnalysisPlatform::default(),
            external_documentation_links: Vec::new(),
            source_links: Vec::new(),
            suppressed_files: Vec::new(),
        }
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_roots.push(root.into());
        self
    }
}
