use serde::Serialize;

use crate::model::mmca::Trajectories;

/// Findings of a probability-simplex audit over a Type Matrix or an updated
/// cooperation vector. The reduction formulas can push individual components
/// out of [0,1]; the engine reports this instead of repairing it.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SimplexAudit {
    pub negative_entries: usize,
    pub max_column_sum_dev: f64,
}

impl SimplexAudit {
    pub fn is_clean(&self, tol: f64) -> bool {
        self.negative_entries == 0 && self.max_column_sum_dev <= tol
    }
}

/// 4 x N distribution over the compound states {CH, CNH, DH, DNH}, one column
/// per node. Derived from the final step of an epidemic pass; recomputed every
/// game round, never mutated in place.
#[derive(Debug, Clone)]
pub struct TypeMatrix {
    pub ch: Vec<f64>,
    pub cnh: Vec<f64>,
    pub dh: Vec<f64>,
    pub dnh: Vec<f64>,
}

impl TypeMatrix {
    /// Reduce the nine micro-state trajectories to the compound-state
    /// distribution at the final recorded step, given vaccine effectiveness
    /// `e` in (0,1]. `p_v / e` recovers the mass that attempted vaccination,
    /// of which only `p_v` actually gained immunity.
    pub fn from_trajectories(traj: &Trajectories, e: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(e > 0.0 && e <= 1.0, "effectiveness e must lie in (0,1] (got {e})");
        let n = traj.num_nodes()?;

        fn last(series: &[Vec<f64>]) -> &[f64] {
            series.last().expect("validated non-empty by num_nodes")
        }
        let (us_c, as_c) = (last(&traj.us_c), last(&traj.as_c));
        let (us_d, as_d) = (last(&traj.us_d), last(&traj.as_d));
        let (uv, av) = (last(&traj.uv), last(&traj.av));
        let (ur, ar) = (last(&traj.ur), last(&traj.ar));

        let mut tm = Self {
            ch: vec![0.0; n],
            cnh: vec![0.0; n],
            dh: vec![0.0; n],
            dnh: vec![0.0; n],
        };
        for i in 0..n {
            let p_s_c = as_c[i] + us_c[i];
            let p_s_d = as_d[i] + us_d[i];
            let p_v = av[i] + uv[i];
            let p_r = ar[i] + ur[i];

            tm.ch[i] = p_s_c + p_v;
            tm.cnh[i] = p_v / e - (p_s_c + p_v);
            tm.dh[i] = p_s_d;
            tm.dnh[i] = p_r - p_v / e + (p_s_c + p_v);
        }
        Ok(tm)
    }

    pub fn num_nodes(&self) -> usize {
        self.ch.len()
    }

    /// Prior cooperation probability of node `i`: CH + CNH.
    pub fn coop_probability(&self, i: usize) -> f64 {
        self.ch[i] + self.cnh[i]
    }

    /// Network-mean cooperation density.
    pub fn coop_density(&self) -> f64 {
        let n = self.num_nodes();
        (0..n).map(|i| self.coop_probability(i)).sum::<f64>() / n as f64
    }

    /// Audit every column against the probability simplex: count negative
    /// entries and measure the worst deviation of a column sum from 1.
    pub fn audit(&self) -> SimplexAudit {
        let mut audit = SimplexAudit::default();
        for i in 0..self.num_nodes() {
            let col = [self.ch[i], self.cnh[i], self.dh[i], self.dnh[i]];
            audit.negative_entries += col.iter().filter(|&&v| v < 0.0).count();
            let dev = (col.iter().sum::<f64>() - 1.0).abs();
            if dev > audit.max_column_sum_dev {
                audit.max_column_sum_dev = dev;
            }
        }
        audit
    }
}
