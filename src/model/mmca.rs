use serde::{Deserialize, Serialize};

use crate::net::Network;

/// Rates of the coupled awareness/epidemic process. Awareness (UAU) spreads on
/// the upper layer, infection (SIR with vaccination) on the lower layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpidemicConfig {
    pub alpha: f64, // awareness transmission per aware upper-layer neighbor
    pub delta: f64, // awareness decay A -> U
    pub beta: f64,  // infection rate per infected lower-layer neighbor (unaware)
    pub eta: f64,   // susceptibility attenuation factor when aware
    pub omega: f64, // vaccination attempt rate for aware susceptible cooperators
    pub eff: f64,   // probability an attempt confers immunity
    pub gamma: f64, // recovery rate I -> R
}

impl EpidemicConfig {
    pub fn check(&self) -> anyhow::Result<()> {
        let rates = [
            ("alpha", self.alpha),
            ("delta", self.delta),
            ("beta", self.beta),
            ("eta", self.eta),
            ("omega", self.omega),
            ("gamma", self.gamma),
        ];
        for (name, v) in rates {
            anyhow::ensure!((0.0..=1.0).contains(&v), "{name} must lie in [0,1] (got {v})");
        }
        anyhow::ensure!(
            self.eff > 0.0 && self.eff <= 1.0,
            "eff must lie in (0,1] (got {})",
            self.eff
        );
        Ok(())
    }
}

/// Cooperator seeding for one epidemic pass: a uniform fraction on the first
/// game round, the updated per-node vector on every later round.
#[derive(Debug, Clone)]
pub enum CoopSeed {
    Uniform(f64),
    PerNode(Vec<f64>),
}

/// Per-node probability time series of the nine micro-states, one row per
/// recorded time step (t = 0..=horizon). Field names follow the
/// Unaware/Aware x Susceptible-Defector/Susceptible-Cooperator/Infected/
/// Recovered/Vaccinated naming; infected nodes are always aware, so there is
/// a single `ai` series.
#[derive(Debug, Clone, Default)]
pub struct Trajectories {
    pub us_d: Vec<Vec<f64>>,
    pub as_d: Vec<Vec<f64>>,
    pub us_c: Vec<Vec<f64>>,
    pub as_c: Vec<Vec<f64>>,
    pub ai: Vec<Vec<f64>>,
    pub ur: Vec<Vec<f64>>,
    pub ar: Vec<Vec<f64>>,
    pub uv: Vec<Vec<f64>>,
    pub av: Vec<Vec<f64>>,
}

impl Trajectories {
    fn series(&self) -> [&Vec<Vec<f64>>; 9] {
        [
            &self.us_d, &self.as_d, &self.us_c, &self.as_c, &self.ai, &self.ur, &self.ar,
            &self.uv, &self.av,
        ]
    }

    /// Node count, after validating that all nine series share the same
    /// non-empty (time x N) shape.
    pub fn num_nodes(&self) -> anyhow::Result<usize> {
        let steps = self.us_d.len();
        anyhow::ensure!(steps > 0, "trajectories are empty");
        let n = self.us_d[0].len();
        anyhow::ensure!(n > 0, "trajectories carry zero nodes");
        for s in self.series() {
            anyhow::ensure!(s.len() == steps, "trajectory length mismatch across micro-states");
            anyhow::ensure!(
                s.iter().all(|row| row.len() == n),
                "node count mismatch across micro-state trajectories"
            );
        }
        Ok(n)
    }

    fn record(&mut self, s: &StateVecs) {
        self.us_d.push(s.us_d.clone());
        self.as_d.push(s.as_d.clone());
        self.us_c.push(s.us_c.clone());
        self.as_c.push(s.as_c.clone());
        self.ai.push(s.ai.clone());
        self.ur.push(s.ur.clone());
        self.ar.push(s.ar.clone());
        self.uv.push(s.uv.clone());
        self.av.push(s.av.clone());
    }
}

#[derive(Debug, Clone)]
struct StateVecs {
    us_d: Vec<f64>,
    as_d: Vec<f64>,
    us_c: Vec<f64>,
    as_c: Vec<f64>,
    ai: Vec<f64>,
    ur: Vec<f64>,
    ar: Vec<f64>,
    uv: Vec<f64>,
    av: Vec<f64>,
}

impl StateVecs {
    fn zero(n: usize) -> Self {
        Self {
            us_d: vec![0.0; n],
            as_d: vec![0.0; n],
            us_c: vec![0.0; n],
            as_c: vec![0.0; n],
            ai: vec![0.0; n],
            ur: vec![0.0; n],
            ar: vec![0.0; n],
            uv: vec![0.0; n],
            av: vec![0.0; n],
        }
    }
}

/// Microscopic Markov chain approximation of the awareness/epidemic process on
/// a two-layer network. Deterministic given identical inputs.
pub struct MmcaModel {
    pub cfg: EpidemicConfig,
    lower: Network,
    upper: Network,
}

impl MmcaModel {
    pub fn new(cfg: EpidemicConfig, lower: Network, upper: Network) -> anyhow::Result<Self> {
        cfg.check()?;
        anyhow::ensure!(
            lower.len() == upper.len(),
            "layers must share the node set (lower={}, upper={})",
            lower.len(),
            upper.len()
        );
        Ok(Self { cfg, lower, upper })
    }

    pub fn num_nodes(&self) -> usize {
        self.lower.len()
    }

    /// Run `horizon` synchronous steps and record every state including t=0.
    /// `init_u` is the initial unaware fraction, `init_i` the initial infected
    /// fraction; `coop` seeds the cooperator split of the susceptible mass.
    pub fn run(
        &self,
        horizon: usize,
        init_u: f64,
        coop: &CoopSeed,
        init_i: f64,
    ) -> anyhow::Result<Trajectories> {
        let n = self.num_nodes();
        anyhow::ensure!((0.0..=1.0).contains(&init_u), "init_u must lie in [0,1]");
        anyhow::ensure!((0.0..=1.0).contains(&init_i), "init_i must lie in [0,1]");

        let coop_of = |i: usize| -> anyhow::Result<f64> {
            match coop {
                CoopSeed::Uniform(c) => {
                    anyhow::ensure!((0.0..=1.0).contains(c), "init_c must lie in [0,1]");
                    Ok(*c)
                }
                CoopSeed::PerNode(v) => {
                    anyhow::ensure!(
                        v.len() == n,
                        "cooperation vector length {} does not match node count {n}",
                        v.len()
                    );
                    Ok(v[i])
                }
            }
        };

        let mut cur = StateVecs::zero(n);
        for i in 0..n {
            let c = coop_of(i)?;
            let s = 1.0 - init_i;
            cur.ai[i] = init_i;
            cur.us_c[i] = s * c * init_u;
            cur.as_c[i] = s * c * (1.0 - init_u);
            cur.us_d[i] = s * (1.0 - c) * init_u;
            cur.as_d[i] = s * (1.0 - c) * (1.0 - init_u);
        }

        let mut traj = Trajectories::default();
        traj.record(&cur);

        let mut next = StateVecs::zero(n);
        for _ in 0..horizon {
            self.step(&cur, &mut next);
            std::mem::swap(&mut cur, &mut next);
            traj.record(&cur);
        }
        Ok(traj)
    }

    /// One synchronous MMCA step. Per-node process order: awareness update,
    /// vaccination attempt, infection, recovery. Probability mass per node is
    /// conserved exactly.
    fn step(&self, cur: &StateVecs, next: &mut StateVecs) {
        let cfg = &self.cfg;
        let n = self.num_nodes();

        // Total aware probability per node, read by all upper-layer neighbors.
        let mut p_aware = vec![0.0; n];
        for j in 0..n {
            p_aware[j] = cur.as_d[j] + cur.as_c[j] + cur.ai[j] + cur.ar[j] + cur.av[j];
        }

        for i in 0..n {
            // r_i: probability of NOT being informed by any upper-layer neighbor.
            let mut r = 1.0;
            for &j in self.upper.neighbors(i) {
                r *= 1.0 - cfg.alpha * p_aware[j];
            }
            // qU/qA: probability of escaping infection from all lower-layer
            // neighbors, unaware vs attenuated aware susceptibility.
            let mut q_u = 1.0;
            let mut q_a = 1.0;
            for &j in self.lower.neighbors(i) {
                q_u *= 1.0 - cfg.beta * cur.ai[j];
                q_a *= 1.0 - cfg.eta * cfg.beta * cur.ai[j];
            }

            // Awareness stage: split susceptible mass into this step's
            // unaware/aware shares.
            let def_u = cur.us_d[i] * r + cur.as_d[i] * cfg.delta;
            let def_a = cur.us_d[i] * (1.0 - r) + cur.as_d[i] * (1.0 - cfg.delta);
            let coop_u = cur.us_c[i] * r + cur.as_c[i] * cfg.delta;
            let coop_a = cur.us_c[i] * (1.0 - r) + cur.as_c[i] * (1.0 - cfg.delta);

            // Vaccination stage: only aware cooperators attempt; failures stay
            // susceptible and exposed this step.
            let vaccinated = coop_a * cfg.omega * cfg.eff;
            let coop_a_exposed = coop_a - vaccinated;

            next.us_d[i] = def_u * q_u;
            next.as_d[i] = def_a * q_a;
            next.us_c[i] = coop_u * q_u;
            next.as_c[i] = coop_a_exposed * q_a;

            // Newly infected nodes are aware by construction.
            next.ai[i] = cur.ai[i] * (1.0 - cfg.gamma)
                + def_u * (1.0 - q_u)
                + def_a * (1.0 - q_a)
                + coop_u * (1.0 - q_u)
                + coop_a_exposed * (1.0 - q_a);

            next.ar[i] = cur.ai[i] * cfg.gamma + cur.ar[i] * (1.0 - cfg.delta) + cur.ur[i] * (1.0 - r);
            next.ur[i] = cur.ur[i] * r + cur.ar[i] * cfg.delta;

            next.av[i] = cur.av[i] * (1.0 - cfg.delta) + cur.uv[i] * (1.0 - r) + vaccinated;
            next.uv[i] = cur.uv[i] * r + cur.av[i] * cfg.delta;
        }
    }
}
