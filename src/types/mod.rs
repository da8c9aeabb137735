pub mod error;
pub mod module;
pub mod source_set;

pub use error::{DocfoldError, Result, ResultExt};
pub use module::{AggregateConfiguration, ModuleConfiguration};
pub use source_set::{
    AnalysisPlatform, ExternalDocumentationLink, SourceLink, SourceSet, SourceSetId, Visibility,
};

// =============================================================================
// Domain Newtypes
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for module (subproject) names
///
/// Prevents accidental mixing of module names with task names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModuleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_conversions() {
        let id = ModuleId::from("core");
        assert_eq!(id.as_str(), "core");
        assert_eq!(id.to_string(), "core");
        assert_eq!(id, ModuleId::new("core".to_string()));
        assert_eq!(id.into_inner(), "core");
    }

    #[test]
    fn test_module_id_serializes_as_string() {
        let json = serde_json::to_string(&ModuleId::new("io")).unwrap();
        assert_eq!(json, "\"io\"");
    }
}
