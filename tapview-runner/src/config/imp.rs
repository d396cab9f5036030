// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{HistoryConfig, SubstitutionRule, TrendConfig, ViewConfig};
use crate::{
    errors::{ConfigParseError, ConfigParseErrorKind},
    view::ViewPreset,
};
use camino::Utf8Path;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Overall configuration for tapview.
///
/// Obtained through [`from_sources`](Self::from_sources), or [`Default`] for the built-in
/// settings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TapviewConfig {
    history: HistoryConfig,
    compatibility: SubstitutionRule,
    view: ViewConfig,
    trend: TrendConfig,
}

impl TapviewConfig {
    /// The default location of the config within a directory: `.config/tapview.toml`.
    pub const CONFIG_PATH: &'static str = ".config/tapview.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Reads the config from the given file, or if not specified from `.config/tapview.toml` in
    /// `root`.
    ///
    /// If no config file is specified and `root` doesn't have `.config/tapview.toml`, uses the
    /// default config options.
    pub fn from_sources(
        root: impl AsRef<Utf8Path>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = root.as_ref().join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };
        debug!("reading tapview config from {config_file}");

        let builder = Self::make_default_config().add_source(source);
        let (config, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            let unknown: Vec<_> = unknown.into_iter().collect();
            warn!(
                "ignoring unknown configuration keys in config file {config_file}: {}",
                unknown.join(", "),
            );
        }

        Ok(config.into_config())
    }

    /// Returns the maximum number of builds in a history table.
    pub fn history_max_builds(&self) -> usize {
        self.history.max_builds.get()
    }

    /// Returns the substitution used to find a job's counterpart.
    pub fn substitution_rule(&self) -> &SubstitutionRule {
        &self.compatibility
    }

    /// Returns the preset a results page starts with.
    pub fn default_preset(&self) -> ViewPreset {
        self.view.default_preset
    }

    /// Returns the number of builds plotted in trend graphs.
    pub fn trend_max_builds(&self) -> usize {
        self.trend.max_builds.get()
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(TapviewConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: TapviewConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // The config crate reports the key as well. Drop it from the inner error so it
                // isn't printed twice.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TapviewConfigDeserialize {
    history: HistoryConfig,
    compatibility: SubstitutionRule,
    view: ViewConfig,
    trend: TrendConfig,
}

impl TapviewConfigDeserialize {
    fn into_config(self) -> TapviewConfig {
        TapviewConfig {
            history: self.history,
            compatibility: self.compatibility,
            view: self.view,
            trend: self.trend,
        }
    }
}
