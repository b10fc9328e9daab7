use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::AppError;
use crate::{config::PipelineConfig, pipeline};

/// Command line tool that trains and evaluates a train delay severity
/// classifier from Deutsche Bahn records and hourly weather
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct DbDelayApp {
    #[command(subcommand)]
    pub op: DbDelayOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum DbDelayOperation {
    /// load, merge and feature-engineer the data, then train and evaluate
    Run {
        /// TOML file overriding the default configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// print the effective configuration as JSON
    ShowConfig {
        /// TOML file overriding the default configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl DbDelayOperation {
    pub fn run(self) -> Result<(), AppError> {
        match self {
            DbDelayOperation::Run { config } => {
                let conf = PipelineConfig::load(config.as_deref())?;
                let evaluation = pipeline::run(&conf)?;
                println!("{evaluation}");
                Ok(())
            }
            DbDelayOperation::ShowConfig { config } => {
                let conf = PipelineConfig::load(config.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&conf)?);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DbDelayApp, DbDelayOperation};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_run() {
        let app = DbDelayApp::try_parse_from(["dbdelay", "run", "--config", "my.toml"])
            .expect("should not fail");
        match app.op {
            DbDelayOperation::Run { config } => {
                assert_eq!(config, Some(PathBuf::from("my.toml")))
            }
            _ => panic!("expected run operation"),
        }
    }

    #[test]
    fn test_parse_show_config() {
        let app = DbDelayApp::try_parse_from(["dbdelay", "show-config"]).expect("should not fail");
        assert!(matches!(
            app.op,
            DbDelayOperation::ShowConfig { config: None }
        ));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(DbDelayApp::try_parse_from(["dbdelay", "serve"]).is_err());
    }
}
