use crate::game::payoff::TransitionTable;
use crate::game::types::TypeMatrix;
use crate::net::Network;

/// Expected one-round change in each node's cooperation probability.
///
/// For node `i` with degree `d_i`, every neighbor `j` contributes pulls toward
/// cooperation weighted by `j`'s cooperator-state mass and the D->C switch
/// probabilities, and pulls toward defection weighted by `j`'s defector-state
/// mass and the C->D switch probabilities; `i`'s own compound-state masses
/// gate the four pulls, normalized by `d_i`.
pub fn delta_p_c(
    tm: &TypeMatrix,
    upper: &Network,
    table: &TransitionTable,
) -> anyhow::Result<Vec<f64>> {
    let n = tm.num_nodes();
    anyhow::ensure!(
        upper.len() == n,
        "type matrix has {n} nodes but game layer has {}",
        upper.len()
    );

    let mut delta = vec![0.0; n];
    for i in 0..n {
        let degree = upper.degree(i);
        anyhow::ensure!(
            degree > 0,
            "node {i} is isolated on the game layer; strategy update is undefined"
        );
        let d = degree as f64;

        let mut sum_dh = 0.0;
        let mut sum_dnh = 0.0;
        let mut sum_ch = 0.0;
        let mut sum_cnh = 0.0;
        for &j in upper.neighbors(i) {
            sum_dh += tm.ch[j] * table.p_dh_ch + tm.cnh[j] * table.p_dh_cnh;
            sum_dnh += tm.ch[j] * table.p_dnh_ch + tm.cnh[j] * table.p_dnh_cnh;
            sum_ch += tm.dh[j] * table.p_ch_dh + tm.dnh[j] * table.p_ch_dnh;
            sum_cnh += tm.dh[j] * table.p_cnh_dh + tm.dnh[j] * table.p_cnh_dnh;
        }

        delta[i] = (tm.dh[i] / d) * sum_dh + (tm.dnh[i] / d) * sum_dnh
            - (tm.ch[i] / d) * sum_ch
            - (tm.cnh[i] / d) * sum_cnh;
    }
    Ok(delta)
}

/// Updated cooperation probability: prior CH + CNH mass plus the expected
/// drift. No clamping; out-of-range values are surfaced by the caller's audit.
pub fn updated_p_c(tm: &TypeMatrix, delta: &[f64]) -> anyhow::Result<Vec<f64>> {
    let n = tm.num_nodes();
    anyhow::ensure!(
        delta.len() == n,
        "delta vector length {} does not match node count {n}",
        delta.len()
    );
    Ok((0..n).map(|i| tm.coop_probability(i) + delta[i]).collect())
}
