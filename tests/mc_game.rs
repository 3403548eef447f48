use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vaxgame::model::mc::McGame;
use vaxgame::model::mmca::EpidemicConfig;
use vaxgame::net::{add_random_edges, barabasi_albert};

fn config() -> EpidemicConfig {
    EpidemicConfig {
        alpha: 0.8,
        delta: 0.2,
        beta: 0.8333,
        eta: 0.6,
        omega: 0.1,
        eff: 0.6,
        gamma: 0.3333,
    }
}

fn layers(seed: u64) -> (vaxgame::net::Network, vaxgame::net::Network) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lower = barabasi_albert(200, 3, &mut rng).unwrap();
    let upper = add_random_edges(&lower, 80, &mut rng).unwrap();
    (lower, upper)
}

#[test]
fn same_seed_reproduces_the_same_trial() {
    let (lower, upper) = layers(5);
    let run = |seed: u64| {
        let mut game = McGame::new(config(), 0.3, lower.clone(), upper.clone(), seed).unwrap();
        game.reset(0.99, 0.1, 0.02).unwrap();
        game.run_epidemic(40);
        game.compute_payoffs();
        let pre = game.coop_density();
        game.imitation_round(0.1).unwrap();
        (pre, game.coop_density())
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn extreme_strategy_seeding_is_exact() {
    let (lower, upper) = layers(5);
    let mut game = McGame::new(config(), 0.3, lower.clone(), upper.clone(), 1).unwrap();
    game.reset(0.99, 1.0, 0.0).unwrap();
    assert_eq!(game.coop_density(), 1.0);
    game.reset(0.99, 0.0, 0.0).unwrap();
    assert_eq!(game.coop_density(), 0.0);
}

#[test]
fn without_infection_payoffs_reduce_to_vaccination_cost() {
    let (lower, upper) = layers(9);
    let mut cfg = config();
    cfg.beta = 0.0;
    let cost_v = 0.3;
    let mut game = McGame::new(cfg, cost_v, lower, upper, 2).unwrap();
    game.reset(0.99, 0.5, 0.0).unwrap();
    game.run_epidemic(40);
    game.compute_payoffs();

    for (i, (&coop, &p)) in game
        .strategies()
        .iter()
        .zip(game.payoffs().iter())
        .enumerate()
    {
        let expected = if coop { -cost_v } else { 0.0 };
        assert_eq!(p, expected, "node {i}");
    }
}

#[test]
fn costly_useless_vaccination_erodes_cooperation() {
    // No disease at all, positive cost and near-deterministic imitation:
    // cooperators switch away when they meet defectors, never the reverse.
    let (lower, upper) = layers(13);
    let mut cfg = config();
    cfg.beta = 0.0;
    let mut game = McGame::new(cfg, 0.3, lower, upper, 3).unwrap();
    game.reset(0.99, 0.5, 0.0).unwrap();
    game.run_epidemic(40);
    game.compute_payoffs();
    let pre = game.coop_density();
    game.imitation_round(0.01).unwrap();
    let post = game.coop_density();
    assert!(post < pre, "pre={pre}, post={post}");
    assert!((0.0..=1.0).contains(&post));
}

#[test]
fn invalid_inputs_rejected() {
    let (lower, upper) = layers(5);
    let mut game = McGame::new(config(), 0.3, lower.clone(), upper.clone(), 1).unwrap();
    assert!(game.reset(1.2, 0.1, 0.02).is_err());
    assert!(game.imitation_round(0.0).is_err());

    let smaller = vaxgame::net::Network::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    assert!(McGame::new(config(), 0.3, lower, smaller, 1).is_err());
}
