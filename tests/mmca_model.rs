use vaxgame::model::mmca::{CoopSeed, EpidemicConfig, MmcaModel};
use vaxgame::net::Network;

fn config() -> EpidemicConfig {
    EpidemicConfig {
        alpha: 0.6,
        delta: 0.4,
        beta: 0.8333,
        eta: 0.6,
        omega: 0.1,
        eff: 0.1,
        gamma: 0.3333,
    }
}

fn two_layers() -> (Network, Network) {
    // Ring of 6 as the contact layer, plus two shortcut edges on the
    // information layer.
    let lower = Network::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap();
    let upper = Network::from_edges(
        6,
        &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (0, 3), (1, 4)],
    )
    .unwrap();
    (lower, upper)
}

#[test]
fn probability_mass_conserved_at_every_step() {
    let (lower, upper) = two_layers();
    let model = MmcaModel::new(config(), lower, upper).unwrap();
    let traj = model.run(25, 0.99, &CoopSeed::Uniform(0.1), 0.02).unwrap();

    let steps = traj.us_d.len();
    assert_eq!(steps, 26, "horizon steps plus the initial state");
    for t in 0..steps {
        for i in 0..6 {
            let sum = traj.us_d[t][i]
                + traj.as_d[t][i]
                + traj.us_c[t][i]
                + traj.as_c[t][i]
                + traj.ai[t][i]
                + traj.ur[t][i]
                + traj.ar[t][i]
                + traj.uv[t][i]
                + traj.av[t][i];
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "node {i} mass {sum} at step {t}"
            );
        }
    }
}

#[test]
fn identical_inputs_give_identical_trajectories() {
    let (lower, upper) = two_layers();
    let model = MmcaModel::new(config(), lower, upper).unwrap();
    let a = model.run(15, 0.99, &CoopSeed::Uniform(0.1), 0.02).unwrap();
    let b = model.run(15, 0.99, &CoopSeed::Uniform(0.1), 0.02).unwrap();
    assert_eq!(a.ai, b.ai);
    assert_eq!(a.us_c, b.us_c);
    assert_eq!(a.av, b.av);
}

#[test]
fn no_infection_pressure_means_geometric_recovery_decay() {
    let (lower, upper) = two_layers();
    let mut cfg = config();
    cfg.beta = 0.0;
    let gamma = cfg.gamma;
    let model = MmcaModel::new(cfg, lower, upper).unwrap();
    let traj = model.run(10, 0.99, &CoopSeed::Uniform(0.5), 0.02).unwrap();

    for t in 0..=10 {
        let expected = 0.02 * (1.0 - gamma).powi(t as i32);
        for i in 0..6 {
            assert!(
                (traj.ai[t][i] - expected).abs() < 1e-12,
                "node {i} ai {} at step {t}, expected {expected}",
                traj.ai[t][i]
            );
        }
    }
}

#[test]
fn defectors_never_vaccinate() {
    let (lower, upper) = two_layers();
    let model = MmcaModel::new(config(), lower, upper).unwrap();
    let traj = model.run(20, 0.99, &CoopSeed::Uniform(0.0), 0.02).unwrap();
    for t in 0..traj.uv.len() {
        for i in 0..6 {
            assert_eq!(traj.uv[t][i], 0.0);
            assert_eq!(traj.av[t][i], 0.0);
        }
    }
}

#[test]
fn per_node_seeding_length_must_match() {
    let (lower, upper) = two_layers();
    let model = MmcaModel::new(config(), lower, upper).unwrap();
    let err = model
        .run(5, 0.99, &CoopSeed::PerNode(vec![0.1; 4]), 0.02)
        .unwrap_err();
    assert!(err.to_string().contains("does not match node count"));
}

#[test]
fn invalid_parameters_rejected() {
    let (lower, upper) = two_layers();
    let mut cfg = config();
    cfg.alpha = 1.5;
    assert!(MmcaModel::new(cfg, lower.clone(), upper.clone()).is_err());

    let mut cfg = config();
    cfg.eff = 0.0;
    assert!(MmcaModel::new(cfg, lower.clone(), upper.clone()).is_err());

    let smaller = Network::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    assert!(MmcaModel::new(config(), lower, smaller).is_err());
}

#[test]
fn mixed_seeding_splits_cooperator_mass_at_t0() {
    let (lower, upper) = two_layers();
    let model = MmcaModel::new(config(), lower, upper).unwrap();
    let seed = vec![0.0, 0.25, 0.5, 0.75, 1.0, 0.3];
    let traj = model.run(1, 0.9, &CoopSeed::PerNode(seed.clone()), 0.1).unwrap();
    for i in 0..6 {
        let coop0 = traj.us_c[0][i] + traj.as_c[0][i];
        assert!(((0.9 * seed[i]) - coop0).abs() < 1e-12);
        let aware0 = traj.as_c[0][i] + traj.as_d[0][i] + traj.ai[0][i];
        assert!((aware0 - (0.9 * 0.1 + 0.1)).abs() < 1e-12);
    }
}
