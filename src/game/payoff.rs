use serde::{Deserialize, Serialize};

use crate::math::fermi::fermi;

/// Compound strategy/outcome states of the vaccination game: cooperate or
/// defect, crossed with whether the node came through the epidemic healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundState {
    /// Cooperated, healthy: paid the vaccination cost only.
    Ch,
    /// Cooperated, not healthy: paid the vaccination cost and the infection cost.
    Cnh,
    /// Defected, healthy: free-rode at no cost.
    Dh,
    /// Defected, not healthy: paid the infection cost.
    Dnh,
}

impl CompoundState {
    /// Payoff relative to the defect-and-stay-healthy baseline of 0, for a
    /// vaccination cost `cost_v` and an infection cost of 1.
    pub fn payoff(self, cost_v: f64) -> f64 {
        match self {
            CompoundState::Dh => 0.0,
            CompoundState::Ch => -cost_v,
            CompoundState::Cnh => -(cost_v + 1.0),
            CompoundState::Dnh => -1.0,
        }
    }
}

/// The eight Fermi switch probabilities across the cooperate/defect boundary.
/// Same-side pairs are never consulted by the strategy update and are not
/// materialized. Immutable for a given (cost_v, k); safe to share across
/// concurrently running trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    pub p_dh_ch: f64,
    pub p_dh_cnh: f64,
    pub p_dnh_ch: f64,
    pub p_dnh_cnh: f64,
    pub p_ch_dh: f64,
    pub p_ch_dnh: f64,
    pub p_cnh_dh: f64,
    pub p_cnh_dnh: f64,
}

impl TransitionTable {
    /// Build the table from the vaccination cost and the Fermi noise
    /// parameter `k`. Every entry lies strictly in (0,1).
    pub fn new(cost_v: f64, k: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(k > 0.0, "rationality parameter k must be positive (got {k})");
        use CompoundState::{Ch, Cnh, Dh, Dnh};
        let p = |from: CompoundState, to: CompoundState| {
            fermi(to.payoff(cost_v) - from.payoff(cost_v), k)
        };
        Ok(Self {
            p_dh_ch: p(Dh, Ch),
            p_dh_cnh: p(Dh, Cnh),
            p_dnh_ch: p(Dnh, Ch),
            p_dnh_cnh: p(Dnh, Cnh),
            p_ch_dh: p(Ch, Dh),
            p_ch_dnh: p(Ch, Dnh),
            p_cnh_dh: p(Cnh, Dh),
            p_cnh_dnh: p(Cnh, Dnh),
        })
    }
}
