use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use odmr_core::constants::HZ_PER_GHZ;
use odmr_spec::{run_sweep, to_canonical_json_bytes, SweepPlan};

use super::{load_config, load_document};

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML or JSON sweep plan; overrides --config, --fields and --angles.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Base simulation config for every job.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Comma separated field magnitudes in tesla.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub fields: Vec<f64>,
    /// Comma separated field angles in degrees.
    #[arg(long, value_delimiter = ',', default_value = "0")]
    pub angles: Vec<f64>,
    /// Master seed; job i uses substream i.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Worker threads.
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

impl SweepArgs {
    fn plan(&self) -> Result<SweepPlan, Box<dyn Error>> {
        if let Some(path) = &self.plan {
            return load_document(path);
        }
        Ok(SweepPlan {
            base: load_config(self.config.as_deref())?,
            fields: self.fields.clone(),
            angles: self.angles.clone(),
            concurrency: self.concurrency,
        })
    }
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let plan = args.plan()?;
    let report = run_sweep(&plan, args.seed)?;
    for job in &report.jobs {
        eprintln!(
            "B={:.4e} T theta={:.1} deg: f-={:.6} GHz f+={:.6} GHz peak={:.4}",
            job.field_tesla,
            job.angle_degrees,
            job.centers.f_minus / HZ_PER_GHZ,
            job.centers.f_plus / HZ_PER_GHZ,
            job.readout.peak_referenced_contrast
        );
    }
    println!("{}", String::from_utf8(to_canonical_json_bytes(&report)?)?);
    Ok(())
}
