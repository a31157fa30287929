use super::toml_config::TomlConfig;
use super::{ConfigOverrides, ProxyConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "quiknepal")]
#[command(about = "Proxy for the QuikNepal calendar, market rate and rashifal API")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind, e.g. 0.0.0.0 or 127.0.0.1
    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Upstream API base URL (overrides API_BASE_URL)
    #[arg(long)]
    pub upstream: Option<String>,

    /// Prefix for every proxy route
    #[arg(long)]
    pub base_path: Option<String>,

    /// Abort upstream calls after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log JSON lines instead of compact text")]
    pub json_logs: bool,

    /// Print the resolved configuration and route table, then exit
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            upstream: self.upstream.clone(),
            base_path: self.base_path.clone(),
            timeout_seconds: self.timeout_seconds,
            json_logs: self.json_logs,
            verbose: self.verbose,
        }
    }

    /// Reads the optional config file, layers environment and flags on top
    /// and validates the result.
    pub fn load_config(&self) -> Result<ProxyConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        let config = ProxyConfig::load(file.as_ref(), &self.overrides())?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "quiknepal",
            "--port",
            "3000",
            "--upstream",
            "http://127.0.0.1:9000/api/",
            "--base-path",
            "/proxy",
            "--timeout-seconds",
            "15",
            "--dry-run",
        ]);

        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(3000));
        assert_eq!(overrides.upstream.as_deref(), Some("http://127.0.0.1:9000/api/"));
        assert_eq!(overrides.base_path.as_deref(), Some("/proxy"));
        assert_eq!(overrides.timeout_seconds, Some(15));
        assert!(args.dry_run);
        assert!(!args.verbose);
    }

    #[test]
    fn test_load_config_from_file_with_flag_override() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 3001\nbase_path = \"/v2\"\n")
            .unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let args = CliArgs::parse_from([
            "quiknepal",
            "--config",
            path.as_str(),
            "--port",
            "4001",
            "--upstream",
            "https://cli.example.com/api/",
        ]);

        let config = args.load_config().unwrap();
        assert_eq!(config.port, 4001);
        assert_eq!(config.base_path, "/v2");
        assert_eq!(config.upstream_base_url, "https://cli.example.com/api/");
    }

    #[test]
    fn test_load_config_rejects_invalid_result() {
        let args = CliArgs::parse_from(["quiknepal", "--upstream", "ftp://example.com/"]);
        assert!(args.load_config().is_err());
    }
}
