use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::game::payoff::TransitionTable;
use crate::game::types::TypeMatrix;
use crate::game::update::{delta_p_c, updated_p_c};
use crate::model::mmca::{CoopSeed, MmcaModel, Trajectories};
use crate::net::Network;

/// Epidemic propagation collaborator consumed by the coupled driver. The
/// mean-field engine implements this; tests inject mocks. Must be
/// deterministic given identical inputs.
pub trait EpidemicEngine {
    fn run(
        &self,
        horizon: usize,
        init_u: f64,
        coop: &CoopSeed,
        init_i: f64,
    ) -> anyhow::Result<Trajectories>;
}

impl EpidemicEngine for MmcaModel {
    fn run(
        &self,
        horizon: usize,
        init_u: f64,
        coop: &CoopSeed,
        init_i: f64,
    ) -> anyhow::Result<Trajectories> {
        MmcaModel::run(self, horizon, init_u, coop, init_i)
    }
}

/// Full configuration of one coupled epidemic/game run. Replaces ad-hoc
/// module-level constants; everything the driver needs travels in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Epidemic steps per game round.
    pub horizon: usize,
    /// Number of game rounds; the only stop condition.
    pub rounds: usize,
    pub cost_v: f64,
    /// Fermi noise parameter, > 0.
    pub k: f64,
    /// Vaccine effectiveness used by the reducer, in (0,1].
    pub eff: f64,
    /// Initial unaware fraction.
    pub init_u: f64,
    /// Initial cooperation fraction (round 0 only).
    pub init_c: f64,
    /// Initial infected fraction.
    pub init_i: f64,
}

impl RunConfig {
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.horizon > 0, "horizon must be positive");
        anyhow::ensure!(self.k > 0.0, "k must be positive (got {})", self.k);
        anyhow::ensure!(
            self.eff > 0.0 && self.eff <= 1.0,
            "eff must lie in (0,1] (got {})",
            self.eff
        );
        for (name, v) in [
            ("init_u", self.init_u),
            ("init_c", self.init_c),
            ("init_i", self.init_i),
        ] {
            anyhow::ensure!((0.0..=1.0).contains(&v), "{name} must lie in [0,1] (got {v})");
        }
        Ok(())
    }
}

/// Per-round observables plus the numerical-consistency findings for that
/// round's Type Matrix and updated cooperation vector.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub round: usize,
    /// Mean cooperation density after the epidemic pass, before the game.
    pub pre_game_density: f64,
    /// Mean cooperation density after the imitation update.
    pub post_game_density: f64,
    /// Negative Type Matrix entries (simplex violation, surfaced not repaired).
    pub negative_type_entries: usize,
    /// Worst |column sum - 1| over the Type Matrix.
    pub max_column_sum_dev: f64,
    /// Updated cooperation probabilities outside [0,1].
    pub out_of_range_p_c: usize,
}

/// Outcome of a coupled run: one record per round and, when at least one round
/// ran, the final per-node cooperation vector.
#[derive(Debug, Clone)]
pub struct CoupledRun {
    pub records: Vec<RoundRecord>,
    pub final_p_c: Option<Vec<f64>>,
}

/// Iterate epidemic pass -> reduce -> strategy update for `cfg.rounds` rounds,
/// threading the per-node cooperation vector between rounds. The vector is the
/// only state crossing the loop boundary; everything else is recomputed.
pub fn run_coupled(
    engine: &dyn EpidemicEngine,
    upper: &Network,
    cfg: &RunConfig,
) -> anyhow::Result<CoupledRun> {
    cfg.check()?;
    let table = TransitionTable::new(cfg.cost_v, cfg.k)?;

    let mut records = Vec::with_capacity(cfg.rounds);
    let mut carried: Option<Vec<f64>> = None;

    for round in 0..cfg.rounds {
        let seed = match &carried {
            None => CoopSeed::Uniform(cfg.init_c),
            Some(v) => CoopSeed::PerNode(v.clone()),
        };
        let traj = engine
            .run(cfg.horizon, cfg.init_u, &seed, cfg.init_i)
            .map_err(|e| e.context(format!("epidemic pass failed in round {round}")))?;

        let tm = TypeMatrix::from_trajectories(&traj, cfg.eff)?;
        let audit = tm.audit();
        if audit.negative_entries > 0 {
            warn!(
                "round {round}: {} negative type-matrix entries (simplex violation)",
                audit.negative_entries
            );
        }

        let delta = delta_p_c(&tm, upper, &table)?;
        let p_c = updated_p_c(&tm, &delta)?;
        let out_of_range = p_c.iter().filter(|&&v| !(0.0..=1.0).contains(&v)).count();
        if out_of_range > 0 {
            warn!("round {round}: {out_of_range} updated cooperation probabilities outside [0,1]");
        }

        let pre = tm.coop_density();
        let post = p_c.iter().sum::<f64>() / p_c.len() as f64;
        info!("round {round}: pre-game density {pre:.6}, post-game density {post:.6}");

        records.push(RoundRecord {
            round,
            pre_game_density: pre,
            post_game_density: post,
            negative_type_entries: audit.negative_entries,
            max_column_sum_dev: audit.max_column_sum_dev,
            out_of_range_p_c: out_of_range,
        });
        carried = Some(p_c);
    }

    Ok(CoupledRun {
        records,
        final_p_c: carried,
    })
}
