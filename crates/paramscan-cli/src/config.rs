//! Configuration for the `paramscan` binary.
//!
//! [`AppConfig::load`] layers the embedded defaults, then
//! `~/.config/paramscan/config.toml` if present, then an explicit `--config`
//! file.

use paramscan_core::ScannerConfig;
use paramscan_ifc::IfcOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[scanner]
allowed_views = ["floor-plan", "ceiling-plan", "3d"]

[ifc]
decimals    = 2
active_view = "3d"
"#;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// `[scanner]` section.
    #[serde(default)]
    pub scanner: ScannerConfig,
    /// `[ifc]` section.
    #[serde(default)]
    pub ifc: IfcOptions,
}

impl AppConfig {
    /// Load the user file and an optional explicit file over the defaults.
    ///
    /// A missing user file is fine; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        Self::layered(Some(user_config_path().as_path()), explicit)
    }

    fn layered(user: Option<&Path>, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = user {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }
        if let Some(path) = explicit {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }
}

fn user_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("paramscan")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramscan_model::ViewKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_load() {
        let cfg = AppConfig::layered(None, None).unwrap();
        assert_eq!(
            cfg.scanner.allowed_views,
            vec![ViewKind::FloorPlan, ViewKind::CeilingPlan, ViewKind::ThreeD]
        );
        assert_eq!(cfg.ifc.decimals, 2);
        assert_eq!(cfg.ifc.active_view, ViewKind::ThreeD);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.toml");
        std::fs::write(
            &path,
            "[scanner]\nallowed_views = [\"section\"]\n\n[ifc]\ndecimals = 3\n",
        )
        .unwrap();

        let cfg = AppConfig::layered(None, Some(path.as_path())).unwrap();
        assert_eq!(cfg.scanner.allowed_views, vec![ViewKind::Section]);
        assert_eq!(cfg.ifc.decimals, 3);
        assert_eq!(cfg.ifc.active_view, ViewKind::ThreeD);
    }

    #[test]
    fn missing_user_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::layered(Some(dir.path().join("none.toml").as_path()), None).unwrap();
        assert_eq!(cfg.ifc.decimals, 2);
    }

    #[test]
    fn missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::layered(None, Some(dir.path().join("none.toml").as_path())).is_err());
    }
}
