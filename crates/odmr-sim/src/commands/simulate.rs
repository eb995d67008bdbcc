use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use odmr_spec::{simulate, to_canonical_json_bytes, Readout, SimulationConfig, SpectrumResult};
use tracing::info;

use super::load_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Canonical JSON of the full result.
    Json,
    /// One row per frequency point.
    Csv,
    /// Only the scalar readout.
    Readout,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// YAML or JSON simulation config; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Bias field magnitude in tesla.
    #[arg(long)]
    pub field: Option<f64>,
    /// Angle between field and NV axis in degrees.
    #[arg(long)]
    pub angle: Option<f64>,
    /// Sweep start frequency in Hz.
    #[arg(long)]
    pub f_start: Option<f64>,
    /// Sweep end frequency in Hz.
    #[arg(long)]
    pub f_end: Option<f64>,
    /// Number of sweep points.
    #[arg(long)]
    pub steps: Option<usize>,
    /// Saturation parameter s.
    #[arg(long)]
    pub saturation: Option<f64>,
    /// Baseline tilt per GHz.
    #[arg(long)]
    pub slope: Option<f64>,
    /// Render single Lorentzian dips instead of hyperfine triplets.
    #[arg(long)]
    pub no_hyperfine: bool,
    /// Emit ideal traces without shot noise.
    #[arg(long)]
    pub no_noise: bool,
    /// Seed for the shot-noise generator.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl SimulateArgs {
    /// Applies command line overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(field) = self.field {
            config.physics.field_tesla = field;
        }
        if let Some(angle) = self.angle {
            config.physics.angle_degrees = angle;
        }
        if let Some(f_start) = self.f_start {
            config.sweep.f_start = f_start;
        }
        if let Some(f_end) = self.f_end {
            config.sweep.f_end = f_end;
        }
        if let Some(steps) = self.steps {
            config.sweep.steps = steps;
        }
        if let Some(saturation) = self.saturation {
            config.line_shape.saturation = saturation;
        }
        if let Some(slope) = self.slope {
            config.acquisition.baseline_slope = slope;
        }
        if let Some(seed) = self.seed {
            config.acquisition.seed = seed;
        }
        if self.no_hyperfine {
            config.physics.hyperfine = false;
        }
        if self.no_noise {
            config.acquisition.noise = false;
        }
        config
    }
}

pub fn run(args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let config = args.apply_overrides(load_config(args.config.as_deref())?);
    let result = simulate(&config)?;
    let readout = Readout::from_result(&result, &config.sweep);
    info!(
        points = result.len(),
        hash = %result.provenance.config_hash,
        "synthesized spectrum"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            eprintln!("{readout}");
            out.write_all(&to_canonical_json_bytes(&result)?)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            eprintln!("{readout}");
            write_csv(&mut out, &result)?;
        }
        OutputFormat::Readout => writeln!(out, "{readout}")?,
    }
    Ok(())
}

/// Writes `frequency_hz,on,off,referenced` rows.
pub fn write_csv<W: Write>(writer: W, result: &SpectrumResult) -> Result<(), Box<dyn Error>> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["frequency_hz", "on", "off", "referenced"])?;
    for idx in 0..result.len() {
        csv.write_record([
            result.frequencies[idx].to_string(),
            result.intensity_on[idx].to_string(),
            result.intensity_off[idx].to_string(),
            result.referenced[idx].to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SimulateArgs,
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let harness = Harness::parse_from([
            "odmr-sim",
            "--field",
            "0.002",
            "--steps",
            "801",
            "--no-noise",
            "--no-hyperfine",
            "--format",
            "csv",
        ]);
        let config = harness.args.apply_overrides(SimulationConfig::default());
        assert_eq!(config.physics.field_tesla, 0.002);
        assert_eq!(config.sweep.steps, 801);
        assert!(!config.acquisition.noise);
        assert!(!config.physics.hyperfine);
        assert_eq!(harness.args.format, OutputFormat::Csv);
    }

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let mut config = SimulationConfig::default();
        config.sweep.steps = 5;
        config.acquisition.noise = false;
        let result = simulate(&config).unwrap();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "frequency_hz,on,off,referenced");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("2600000000,"));
    }
}
