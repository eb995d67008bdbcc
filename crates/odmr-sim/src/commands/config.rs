use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use odmr_spec::{to_yaml_string, SimulationConfig};

use super::load_config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Validate and echo this config instead of the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> Result<(), Box<dyn Error>> {
    let config: SimulationConfig = load_config(args.config.as_deref())?;
    config.validate()?;
    print!("{}", to_yaml_string(&config)?);
    Ok(())
}
