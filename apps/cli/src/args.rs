use clap::Parser;
use std::path::PathBuf;

use tally_batch::{BatchResult, RunConfig};

/// Batch sales processor: validates sales against stock and reports revenue.
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML config file (default: tally.toml in the platform config dir).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Product catalog CSV.
    #[arg(long)]
    pub products: Option<PathBuf>,

    /// Sale requests CSV.
    #[arg(long)]
    pub sales: Option<PathBuf>,

    /// Where to write the updated inventory CSV.
    #[arg(long)]
    pub inventory_out: Option<PathBuf>,

    /// Where to write the text report.
    #[arg(long)]
    pub report_out: Option<PathBuf>,

    /// Only print the final summary.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Flags win over file and environment values.
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(path) = &self.products {
            config.files.products = path.clone();
        }
        if let Some(path) = &self.sales {
            config.files.sales = path.clone();
        }
        if let Some(path) = &self.inventory_out {
            config.files.inventory_out = path.clone();
        }
        if let Some(path) = &self.report_out {
            config.files.report_out = path.clone();
        }
    }

    /// File and environment values, then flags, validated once at the end.
    pub fn resolve_config(&self, lookup: impl Fn(&str) -> Option<String>) -> BatchResult<RunConfig> {
        let mut config = RunConfig::resolve_with(self.config.clone(), lookup)?;
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["tally", "--sales", "march.csv", "--quiet"]);
        let mut config = RunConfig::default();
        args.apply_to(&mut config);

        assert!(args.quiet);
        assert_eq!(config.files.sales, PathBuf::from("march.csv"));
        assert_eq!(config.files.products, PathBuf::from("productos.csv"));
    }

    #[test]
    fn test_flag_fixes_conflicting_env_value() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tally.toml");
        std::fs::write(&config_path, "[store]\nname = \"Downtown\"\n").unwrap();
        let config_arg = config_path.to_str().unwrap();
        let env = |key: &str| (key == "TALLY_REPORT_OUT").then(|| "inventario_actualizado.csv".to_string());

        let args = Args::parse_from(["tally", "--config", config_arg]);
        assert!(args.resolve_config(env).is_err());

        let args = Args::parse_from(["tally", "--config", config_arg, "--report-out", "b.txt"]);
        let config = args.resolve_config(env).unwrap();
        assert_eq!(config.files.report_out, PathBuf::from("b.txt"));
        assert_eq!(config.store.name, "Downtown");
    }

    #[test]
    fn test_kebab_case_flags() {
        let args = Args::parse_from(["tally", "--inventory-out", "a.csv", "--report-out", "b.txt"]);
        assert_eq!(args.inventory_out, Some(PathBuf::from("a.csv")));
        assert_eq!(args.report_out, Some(PathBuf::from("b.txt")));
    }
}
