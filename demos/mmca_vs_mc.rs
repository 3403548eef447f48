use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vaxgame::game::driver::{run_coupled, RunConfig};
use vaxgame::model::mc::McGame;
use vaxgame::model::mmca::{EpidemicConfig, MmcaModel};
use vaxgame::net::{add_random_edges, barabasi_albert};

/// One game round, mean-field vs Monte Carlo, on the same network pair.
/// The MC densities are averaged over repeated stochastic iterations.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seed = 1_u64;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lower = barabasi_albert(500, 5, &mut rng)?;
    let upper = add_random_edges(&lower, 200, &mut rng)?;

    let epi = EpidemicConfig {
        alpha: 0.8,
        delta: 0.2,
        beta: 0.8333,
        eta: 0.6,
        omega: 0.1,
        eff: 0.6,
        gamma: 0.3333,
    };
    let cfg = RunConfig {
        horizon: 40,
        rounds: 1,
        cost_v: 0.3,
        k: 0.1,
        eff: epi.eff,
        init_u: 0.99,
        init_c: 0.1,
        init_i: 0.02,
    };

    let model = MmcaModel::new(epi.clone(), lower.clone(), upper.clone())?;
    let out = run_coupled(&model, &upper, &cfg)?;
    let rec = &out.records[0];
    println!("MMCA pre-game cooperator density:  {:.6}", rec.pre_game_density);
    println!("MMCA post-game cooperator density: {:.6}", rec.post_game_density);

    let n_iterations = 50;
    let mut game = McGame::new(epi, cfg.cost_v, lower, upper, seed)?;
    let mut total_pre = 0.0;
    let mut total_post = 0.0;
    for _ in 0..n_iterations {
        game.reset(cfg.init_u, cfg.init_c, cfg.init_i)?;
        game.run_epidemic(cfg.horizon);
        game.compute_payoffs();
        total_pre += game.coop_density();
        game.imitation_round(cfg.k)?;
        total_post += game.coop_density();
    }
    println!(
        "MC pre-game cooperator density ({} iterations):  {:.6}",
        n_iterations,
        total_pre / n_iterations as f64
    );
    println!(
        "MC post-game cooperator density ({} iterations): {:.6}",
        n_iterations,
        total_post / n_iterations as f64
    );

    Ok(())
}
