use crate::math::linalg::spectral_radius;
use crate::net::Network;

/// Compute the infection rate beta that achieves a target R0 on the contact
/// layer. For SIR on a network, R0 = (beta / gamma) * rho(A) where rho(A) is
/// the adjacency spectral radius, so beta = r0 * gamma / rho(A).
pub fn beta_from_r0(lower: &Network, gamma: f64, r0: f64) -> f64 {
    let rho = spectral_radius(&lower.to_dense(), 10_000, 1e-10).max(1e-12);
    r0 * gamma / rho
}
