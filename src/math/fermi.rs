/// Fermi (logistic) imitation rule: probability of adopting a strategy whose
/// payoff exceeds the current one by `payoff_diff`, with noise parameter `k`.
/// Larger `k` means noisier (less rational) switching.
///
/// Callers must guarantee `k > 0`; the table builder validates this once.
pub fn fermi(payoff_diff: f64, k: f64) -> f64 {
    1.0 / (1.0 + (-payoff_diff / k).exp())
}
