//! Plugin Features
//!
//! Feature flags and the one-time notices that go with them.
//!
//! A single `PluginFeatures` is registered per process so each notice is
//! logged once, however many modules or tasks ask for a flag.

use std::sync::OnceLock;

use tracing::{info, warn};

use crate::config::FeatureFlags;

/// Config key enabling v2 mode
pub const V2_PLUGIN_ENABLED_FLAG: &str = "features.enable_v2";

/// Config key suppressing the v2 notice
pub const V2_PLUGIN_MESSAGE_SUPPRESSED_FLAG: &str = "features.suppress_v2_message";

/// Config key enabling K2 analysis
pub const K2_ANALYSIS_ENABLED_FLAG: &str = "features.enable_k2_analysis";

/// Config key suppressing the K2 notice
pub const K2_ANALYSIS_MESSAGE_SUPPRESSED_FLAG: &str = "features.suppress_k2_message";

/// Generator environment variable carrying the plugin mode (`v2` or `classic`)
pub const MODE_ENV: &str = "DOCFOLD_PLUGIN_MODE";

/// Generator environment variable selecting the analysis backend
pub const ANALYSIS_ENV: &str = "DOCFOLD_ANALYSIS";

static SHARED: OnceLock<PluginFeatures> = OnceLock::new();

/// Feature flag service with lazily logged notices
#[derive(Debug)]
pub struct PluginFeatures {
    flags: FeatureFlags,
    v2_enabled: OnceLock<bool>,
    k2_enabled: OnceLock<bool>,
}

impl PluginFeatures {
    pub fn new(flags: FeatureFlags) -> Self {
        Self {
            flags,
            v2_enabled: OnceLock::new(),
            k2_enabled: OnceLock::new(),
        }
    }

    /// Register the process-wide service, or get the existing instance.
    ///
    /// Flags passed after the first registration are ignored.
    pub fn shared(flags: &FeatureFlags) -> &'static PluginFeatures {
        SHARED.get_or_init(|| PluginFeatures::new(flags.clone()))
    }

    /// Whether v2 mode is enabled. Logs the mode notice on first call.
    pub fn enable_v2(&self) -> bool {
        *self.v2_enabled.get_or_init(|| {
            let enabled = self.flags.enable_v2;

            if let Some(notice) = v2_notice(&self.flags) {
                if enabled {
                    info!("\n{}", notice);
                } else {
                    warn!("\n{}", notice);
                }
            }

            enabled
        })
    }

    /// Whether K2 analysis is enabled. Logs the experimental notice on first call.
    pub fn enable_k2_analysis(&self) -> bool {
        *self.k2_enabled.get_or_init(|| {
            let enabled = self.flags.enable_k2_analysis;

            if let Some(notice) = k2_notice(&self.flags) {
                info!("\n{}", notice);
            }

            enabled
        })
    }

    /// Environment the generator runs with for these flags
    pub fn generator_env(&self) -> Vec<(&'static str, &'static str)> {
        let mode = if self.enable_v2() { "v2" } else { "classic" };
        let mut env = vec![(MODE_ENV, mode)];
        if self.enable_k2_analysis() {
            env.push((ANALYSIS_ENV, "k2"));
        }
        env
    }
}

/// Mode notice, if one should be shown for these flags
fn v2_notice(flags: &FeatureFlags) -> Option<String> {
    if !flags.enable_v2 {
        let text = format!(
            "⚠ Warning: docfold classic mode is enabled\n\
             \n\
             \x20 The generator runs with {}=classic. Classic mode is deprecated\n\
             \x20 and will be removed in a future release.\n\
             \n\
             \x20 Once your project is ready, enable v2 by adding\n\
             \x20     {} = true\n\
             \x20 to your docfold configuration.",
            MODE_ENV, V2_PLUGIN_ENABLED_FLAG
        );
        Some(surround_with_border(&text))
    } else if !flags.suppress_v2_message {
        let text = format!(
            "docfold v2 mode is enabled ♡\n\
             \n\
             \x20 You can suppress this message by adding\n\
             \x20     {} = true\n\
             \x20 to your docfold configuration.",
            V2_PLUGIN_MESSAGE_SUPPRESSED_FLAG
        );
        Some(surround_with_border(&text))
    } else {
        None
    }
}

/// Experimental analysis notice, if one should be shown for these flags
fn k2_notice(flags: &FeatureFlags) -> Option<String> {
    if flags.enable_k2_analysis && !flags.suppress_k2_message {
        let text = format!(
            "K2 analysis is enabled\n\
             \n\
             \x20 This feature is experimental and still under active development.\n\
             \x20 It can cause generator failures or incorrect documentation.\n\
             \n\
             \x20 Set {} = true to hide this message.",
            K2_ANALYSIS_MESSAGE_SUPPRESSED_FLAG
        );
        Some(surround_with_border(&text))
    } else {
        None
    }
}

/// Draw a box border around multi-line text so it stands out in logs
pub fn surround_with_border(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let max_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let horizontal = "─".repeat(max_len);

    let mut out = String::new();
    out.push_str(&format!("┌─{}─┐\n", horizontal));
    for line in lines {
        let pad = max_len - line.chars().count();
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("└─{}─┘\n", horizontal));
    out
}
