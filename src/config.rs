use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Launcher keyword shown in the connect hint.
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Catalog file overriding the built-in country list.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Locations probed for the nordvpn binary, in order.
    #[serde(default = "default_nordvpn_paths")]
    pub nordvpn_paths: Vec<PathBuf>,
    /// Maximum number of result rows per query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_keyword() -> String {
    "nord".to_string()
}

fn default_nordvpn_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/bin/nordvpn"),
        PathBuf::from("/bin/nordvpn"),
    ]
}

fn default_max_results() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            catalog: None,
            nordvpn_paths: default_nordvpn_paths(),
            max_results: default_max_results(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let proj_dirs = ProjectDirs::from("org", "nordpick", "nordpick");
    let config_path = if let Some(dirs) = &proj_dirs {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.keyword, "nord");
        assert_eq!(config.max_results, 10);
        assert!(config.catalog.is_none());
        assert_eq!(config.nordvpn_paths.len(), 2);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = toml::from_str(r#"keyword = "vpn""#).unwrap();
        assert_eq!(config.keyword, "vpn");
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn full_file_parses() {
        let config: Config = toml::from_str(
            r#"
            keyword = "v"
            catalog = "/tmp/countries.json"
            nordvpn_paths = ["/opt/nordvpn/bin/nordvpn"]
            max_results = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/countries.json")));
        assert_eq!(config.nordvpn_paths, [PathBuf::from("/opt/nordvpn/bin/nordvpn")]);
        assert_eq!(config.max_results, 5);
    }
}
