//! Container Names
//!
//! Names of the per-format task and classpath containers.
//!
//! Every name is a base name with the capitalised format appended, so the
//! html format yields `docfoldHtml`, `docfoldPluginHtml` and so on. The task
//! name doubles as the directory a module's configuration task writes into.

use crate::constants::naming::{BASE_NAME, PLUGINS_CLASSPATH_BASE};

/// Derived container names for one output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNames {
    format_name: String,
}

impl ContainerNames {
    pub fn new(format_name: impl Into<String>) -> Self {
        Self {
            format_name: format_name.into(),
        }
    }

    pub fn format_name(&self) -> &str {
        &self.format_name
    }

    fn append_format(&self, base: &str) -> String {
        format!("{}{}", base, uppercase_first(&self.format_name))
    }

    /// Per-module configuration task, e.g. `docfoldHtml`
    pub fn task(&self) -> String {
        self.append_format(BASE_NAME)
    }

    /// Generator plugins including transitive dependencies
    pub fn plugins_classpath(&self) -> String {
        self.append_format(PLUGINS_CLASSPATH_BASE)
    }

    /// Generator plugins without transitive dependencies
    pub fn plugins_classpath_intransitive_resolver(&self) -> String {
        format!("{}PluginsClasspathIntransitiveResolver", self.task())
    }

    /// Classpath used to execute the generator; extends [`Self::plugins_classpath`]
    pub fn generator_classpath(&self) -> String {
        format!("{}GeneratorClasspath", self.task())
    }

    pub fn generator_classpath_resolver(&self) -> String {
        format!("{}GeneratorClasspathResolver", self.task())
    }

    pub fn publication_plugin_classpath(&self) -> String {
        format!("{}PublicationPluginClasspath", self.task())
    }

    pub fn publication_plugin_classpath_api_only(&self) -> String {
        format!("{}ApiOnly", self.publication_plugin_classpath())
    }

    pub fn publication_plugin_classpath_resolver(&self) -> String {
        format!("{}Resolver", self.publication_plugin_classpath())
    }

    pub fn publication_plugin_classpath_api_only_consumable(&self) -> String {
        format!("{}Consumable", self.publication_plugin_classpath_api_only())
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_names() {
        let names = ContainerNames::new("html");
        assert_eq!(names.task(), "docfoldHtml");
        assert_eq!(names.plugins_classpath(), "docfoldPluginHtml");
        assert_eq!(
            names.plugins_classpath_intransitive_resolver(),
            "docfoldHtmlPluginsClasspathIntransitiveResolver"
        );
        assert_eq!(names.generator_classpath(), "docfoldHtmlGeneratorClasspath");
        assert_eq!(
            names.generator_classpath_resolver(),
            "docfoldHtmlGeneratorClasspathResolver"
        );
    }

    #[test]
    fn test_publication_names_chain() {
        let names = ContainerNames::new("gfm");
        assert_eq!(
            names.publication_plugin_classpath(),
            "docfoldGfmPublicationPluginClasspath"
        );
        assert_eq!(
            names.publication_plugin_classpath_api_only(),
            "docfoldGfmPublicationPluginClasspathApiOnly"
        );
        assert_eq!(
            names.publication_plugin_classpath_resolver(),
            "docfoldGfmPublicationPluginClasspathResolver"
        );
        assert_eq!(
            names.publication_plugin_classpath_api_only_consumable(),
            "docfoldGfmPublicationPluginClasspathApiOnlyConsumable"
        );
    }

    #[test]
    fn test_empty_format() {
        assert_eq!(ContainerNames::new("").task(), "docfold");
    }
}
