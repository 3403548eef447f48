use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vaxgame::game::driver::{run_coupled, RunConfig};
use vaxgame::io::results::append_round_records_csv;
use vaxgame::model::mmca::{EpidemicConfig, MmcaModel};
use vaxgame::net::{add_random_edges, barabasi_albert};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seed = 1_u64;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lower = barabasi_albert(500, 5, &mut rng)?;
    let upper = add_random_edges(&lower, 200, &mut rng)?;

    let epi = EpidemicConfig {
        alpha: 0.6,
        delta: 0.4,
        beta: 0.8333,
        eta: 0.6,
        omega: 0.1,
        eff: 0.1,
        gamma: 0.3333,
    };
    let cfg = RunConfig {
        horizon: 40,
        rounds: 39,
        cost_v: 0.7,
        k: 0.1,
        eff: epi.eff,
        init_u: 0.99,
        init_c: 0.1,
        init_i: 0.02,
    };

    let model = MmcaModel::new(epi, lower, upper.clone())?;
    let out = run_coupled(&model, &upper, &cfg)?;

    println!("round,pre_game_density,post_game_density");
    for r in &out.records {
        println!(
            "{},{:.6},{:.6}",
            r.round, r.pre_game_density, r.post_game_density
        );
    }

    let path = append_round_records_csv("runs", "mmca_cost_v0.7-eff0.10", seed, &out.records)?;
    println!("results appended to {}", path.display());
    Ok(())
}
