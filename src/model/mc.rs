use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::math::fermi::fermi;
use crate::model::mmca::EpidemicConfig;
use crate::net::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Health {
    Susceptible,
    Infected,
    Recovered,
    Vaccinated,
}

/// Stochastic agent-based realization of the same awareness/epidemic/game
/// process as the mean-field engine, used to validate the MMCA numbers.
/// Deterministic for a given seed; independent trials use different seeds.
pub struct McGame {
    cfg: EpidemicConfig,
    cost_v: f64,
    lower: Network,
    upper: Network,
    strategy_c: Vec<bool>,
    aware: Vec<bool>,
    health: Vec<Health>,
    infected_ever: Vec<bool>,
    payoff: Vec<f64>,
    rng: ChaCha8Rng,
}

impl McGame {
    pub fn new(
        cfg: EpidemicConfig,
        cost_v: f64,
        lower: Network,
        upper: Network,
        seed: u64,
    ) -> anyhow::Result<Self> {
        cfg.check()?;
        anyhow::ensure!(
            lower.len() == upper.len(),
            "layers must share the node set (lower={}, upper={})",
            lower.len(),
            upper.len()
        );
        let n = lower.len();
        Ok(Self {
            cfg,
            cost_v,
            lower,
            upper,
            strategy_c: vec![false; n],
            aware: vec![false; n],
            health: vec![Health::Susceptible; n],
            infected_ever: vec![false; n],
            payoff: vec![0.0; n],
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.lower.len()
    }

    /// Reset awareness, strategies, health and infection seeding for one
    /// iteration. Strategies are redrawn i.i.d. with cooperation probability
    /// `init_c`.
    pub fn reset(&mut self, init_u: f64, init_c: f64, init_i: f64) -> anyhow::Result<()> {
        anyhow::ensure!((0.0..=1.0).contains(&init_u), "init_u must lie in [0,1]");
        anyhow::ensure!((0.0..=1.0).contains(&init_c), "init_c must lie in [0,1]");
        anyhow::ensure!((0.0..=1.0).contains(&init_i), "init_i must lie in [0,1]");
        let n = self.num_nodes();
        for i in 0..n {
            self.aware[i] = self.rng.gen::<f64>() >= init_u;
            self.strategy_c[i] = self.rng.gen::<f64>() < init_c;
            self.infected_ever[i] = false;
            self.payoff[i] = 0.0;
            if self.rng.gen::<f64>() < init_i {
                self.health[i] = Health::Infected;
                self.aware[i] = true;
                self.infected_ever[i] = true;
            } else {
                self.health[i] = Health::Susceptible;
            }
        }
        Ok(())
    }

    /// Run `steps` synchronous epidemic steps with the same per-step process
    /// order as the mean-field engine.
    pub fn run_epidemic(&mut self, steps: usize) {
        for _ in 0..steps {
            self.epidemic_step();
        }
    }

    fn epidemic_step(&mut self) {
        let n = self.num_nodes();
        let cfg = self.cfg.clone();
        let aware_prev = self.aware.clone();
        let health_prev = self.health.clone();

        // Awareness stage (upper layer). Infected nodes stay aware.
        for i in 0..n {
            if health_prev[i] == Health::Infected {
                self.aware[i] = true;
                continue;
            }
            if aware_prev[i] {
                if self.rng.gen::<f64>() < cfg.delta {
                    self.aware[i] = false;
                }
            } else {
                for &j in self.upper.neighbors(i) {
                    if aware_prev[j] && self.rng.gen::<f64>() < cfg.alpha {
                        self.aware[i] = true;
                        break;
                    }
                }
            }
        }

        // Vaccination stage: aware susceptible cooperators attempt.
        for i in 0..n {
            if self.health[i] == Health::Susceptible
                && self.aware[i]
                && self.strategy_c[i]
                && self.rng.gen::<f64>() < cfg.omega
                && self.rng.gen::<f64>() < cfg.eff
            {
                self.health[i] = Health::Vaccinated;
            }
        }

        // Infection stage (lower layer), against the previous step's infected set.
        for i in 0..n {
            if self.health[i] != Health::Susceptible {
                continue;
            }
            let rate = if self.aware[i] {
                cfg.eta * cfg.beta
            } else {
                cfg.beta
            };
            for &j in self.lower.neighbors(i) {
                if health_prev[j] == Health::Infected && self.rng.gen::<f64>() < rate {
                    self.health[i] = Health::Infected;
                    self.aware[i] = true;
                    self.infected_ever[i] = true;
                    break;
                }
            }
        }

        // Recovery stage.
        for i in 0..n {
            if health_prev[i] == Health::Infected
                && self.health[i] == Health::Infected
                && self.rng.gen::<f64>() < cfg.gamma
            {
                self.health[i] = Health::Recovered;
            }
        }
    }

    /// End-of-epidemic payoffs: cooperating costs `cost_v`, having been
    /// infected costs 1, additive.
    pub fn compute_payoffs(&mut self) {
        for i in 0..self.num_nodes() {
            let mut p = 0.0;
            if self.strategy_c[i] {
                p -= self.cost_v;
            }
            if self.infected_ever[i] {
                p -= 1.0;
            }
            self.payoff[i] = p;
        }
    }

    /// One imitation round: every node compares payoffs against a uniformly
    /// random upper-layer neighbor and adopts its strategy with the Fermi
    /// probability. Nodes without game-layer neighbors keep their strategy.
    pub fn imitation_round(&mut self, k: f64) -> anyhow::Result<()> {
        anyhow::ensure!(k > 0.0, "rationality parameter k must be positive (got {k})");
        let prev = self.strategy_c.clone();
        for i in 0..self.num_nodes() {
            let Some(&j) = self.upper.neighbors(i).choose(&mut self.rng) else {
                continue;
            };
            let p = fermi(self.payoff[j] - self.payoff[i], k);
            if self.rng.gen::<f64>() < p {
                self.strategy_c[i] = prev[j];
            }
        }
        Ok(())
    }

    pub fn strategies(&self) -> &[bool] {
        &self.strategy_c
    }

    pub fn payoffs(&self) -> &[f64] {
        &self.payoff
    }

    /// Current cooperator density.
    pub fn coop_density(&self) -> f64 {
        let n = self.num_nodes();
        self.strategy_c.iter().filter(|&&c| c).count() as f64 / n as f64
    }
}
