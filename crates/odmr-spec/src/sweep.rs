//! Parallel field and angle sweeps.

use odmr_core::errors::{ErrorInfo, OdmrError};
use odmr_core::rng::RngHandle;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimulationConfig;
use crate::hash::stable_hash_string;
use crate::report::{synthesize, Readout};
use crate::resonance::ResonanceCenters;

fn sweep_error(code: &str, err: impl ToString) -> OdmrError {
    OdmrError::InvalidConfig(ErrorInfo::new(code, err.to_string()))
}

const fn default_concurrency() -> usize {
    1
}

/// Grid of bias fields and angles evaluated against a shared base config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Configuration every job starts from.
    #[serde(default)]
    pub base: SimulationConfig,
    /// Field magnitudes in tesla.
    pub fields: Vec<f64>,
    /// Field angles in degrees.
    #[serde(default = "default_angles")]
    pub angles: Vec<f64>,
    /// Worker threads used to execute jobs.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_angles() -> Vec<f64> {
    vec![0.0]
}

/// Outcome of one (field, angle) job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepJobReport {
    /// Position of the job in field-major order.
    pub index: usize,
    /// Field magnitude in tesla.
    pub field_tesla: f64,
    /// Field angle in degrees.
    pub angle_degrees: f64,
    /// Substream seed used for the shot noise.
    pub seed: u64,
    /// Transition centres.
    pub centers: ResonanceCenters,
    /// `f_plus - f_minus` in Hz.
    pub splitting: f64,
    /// Diagnostics of the synthesized spectrum.
    pub readout: Readout,
    /// Content hash of the full spectrum.
    pub result_hash: String,
}

/// Hashed identity of a sweep: everything except the worker count.
#[derive(Serialize)]
struct PlanKey<'a> {
    base: &'a SimulationConfig,
    fields: &'a [f64],
    angles: &'a [f64],
    master_seed: u64,
}

/// Aggregate report for a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Hash of the plan grid, base config and master seed.
    pub plan_hash: String,
    /// Per-job reports in field-major order.
    pub jobs: Vec<SweepJobReport>,
}

impl SweepPlan {
    /// Expands the field × angle grid into per-job configurations.
    pub fn jobs(&self) -> Vec<SimulationConfig> {
        let mut jobs = Vec::with_capacity(self.fields.len() * self.angles.len());
        for &field in &self.fields {
            for &angle in &self.angles {
                let mut config = self.base;
                config.physics.field_tesla = field;
                config.physics.angle_degrees = angle;
                jobs.push(config);
            }
        }
        jobs
    }
}

/// Runs every job of the plan on a worker pool.
///
/// Job `i` draws its noise from substream `i` of `master_seed`, and
/// `concurrency` is left out of the plan hash, so the report does not depend on
/// the number of threads.
pub fn run_sweep(plan: &SweepPlan, master_seed: u64) -> Result<SweepReport, OdmrError> {
    if plan.fields.is_empty() || plan.angles.is_empty() {
        return Err(OdmrError::InvalidConfig(
            ErrorInfo::new("empty-sweep", "a sweep needs at least one field and one angle")
                .with_context("fields", plan.fields.len())
                .with_context("angles", plan.angles.len()),
        ));
    }
    plan.base.validate()?;
    let plan_hash = stable_hash_string(&PlanKey {
        base: &plan.base,
        fields: &plan.fields,
        angles: &plan.angles,
        master_seed,
    })?;
    let jobs = plan.jobs();
    info!(jobs = jobs.len(), concurrency = plan.concurrency, "starting sweep");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(plan.concurrency.max(1))
        .build()
        .map_err(|err| sweep_error("thread-pool", err))?;

    let results: Result<Vec<SweepJobReport>, OdmrError> = pool.install(|| {
        jobs.par_iter()
            .enumerate()
            .map(|(index, config)| run_job(index, config, master_seed))
            .collect()
    });
    let mut jobs = results?;
    jobs.sort_by_key(|job| job.index);
    info!(jobs = jobs.len(), "sweep finished");

    Ok(SweepReport { plan_hash, jobs })
}

fn run_job(
    index: usize,
    config: &SimulationConfig,
    master_seed: u64,
) -> Result<SweepJobReport, OdmrError> {
    let mut rng = RngHandle::substream(master_seed, index as u64);
    let seed = rng.seed();
    let result = synthesize(config, &mut rng)?;
    let readout = Readout::from_result(&result, &config.sweep);
    Ok(SweepJobReport {
        index,
        field_tesla: config.physics.field_tesla,
        angle_degrees: config.physics.angle_degrees,
        seed,
        centers: result.centers,
        splitting: result.centers.splitting(),
        readout,
        result_hash: stable_hash_string(&result)?,
    })
}
