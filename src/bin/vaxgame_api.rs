use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;

use vaxgame::game::driver::{run_coupled, RoundRecord, RunConfig};
use vaxgame::model::mmca::{EpidemicConfig, MmcaModel};
use vaxgame::net::{add_random_edges, barabasi_albert};

#[derive(Debug, Deserialize)]
struct RunRequest {
    n: Option<usize>,
    m: Option<usize>,
    extra_edges: Option<usize>,
    seed: Option<u64>,
    rounds: Option<usize>,
    horizon: Option<usize>,
    cost_v: Option<f64>,
    k: Option<f64>,
    alpha: Option<f64>,
    delta: Option<f64>,
    beta: Option<f64>,
    eta: Option<f64>,
    omega: Option<f64>,
    eff: Option<f64>,
    gamma: Option<f64>,
    init_u: Option<f64>,
    init_c: Option<f64>,
    init_i: Option<f64>,
}

#[derive(Debug, Serialize)]
struct RunResponse {
    return_code: i32,
    n: usize,
    seed: u64,
    rounds: Vec<RoundRecord>,
    final_mean_p_c: Option<f64>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/run", post(run));

    let addr: SocketAddr = format!("{}:{}", host, port).parse().expect("invalid HOST/PORT");
    log::info!("[vaxgame-api] listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server failed");
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn run(Json(req): Json<RunRequest>) -> impl IntoResponse {
    // The coupled run is CPU-bound; keep it off the async workers.
    let join = tokio::task::spawn_blocking(move || run_sync(req));
    match join.await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"return_code": 2, "error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}

fn run_sync(req: RunRequest) -> Result<RunResponse, (StatusCode, serde_json::Value)> {
    let n = req.n.unwrap_or(500);
    let m = req.m.unwrap_or(5);
    let extra_edges = req.extra_edges.unwrap_or(200);
    let seed = req.seed.unwrap_or(1);

    let epi = EpidemicConfig {
        alpha: req.alpha.unwrap_or(0.6),
        delta: req.delta.unwrap_or(0.4),
        beta: req.beta.unwrap_or(0.8333),
        eta: req.eta.unwrap_or(0.6),
        omega: req.omega.unwrap_or(0.1),
        eff: req.eff.unwrap_or(0.1),
        gamma: req.gamma.unwrap_or(0.3333),
    };
    let cfg = RunConfig {
        horizon: req.horizon.unwrap_or(40),
        rounds: req.rounds.unwrap_or(39),
        cost_v: req.cost_v.unwrap_or(0.7),
        k: req.k.unwrap_or(0.1),
        eff: epi.eff,
        init_u: req.init_u.unwrap_or(0.99),
        init_c: req.init_c.unwrap_or(0.1),
        init_i: req.init_i.unwrap_or(0.02),
    };

    let bad_request = |e: anyhow::Error| {
        (
            StatusCode::BAD_REQUEST,
            json!({"return_code": 1, "error": format!("{e:#}")}),
        )
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lower = barabasi_albert(n, m, &mut rng).map_err(bad_request)?;
    let upper = add_random_edges(&lower, extra_edges, &mut rng).map_err(bad_request)?;

    let model = MmcaModel::new(epi, lower, upper.clone()).map_err(bad_request)?;
    let out = run_coupled(&model, &upper, &cfg).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"return_code": 2, "error": format!("{e:#}")}),
        )
    })?;

    let final_mean_p_c = out
        .final_p_c
        .as_ref()
        .map(|v| v.iter().sum::<f64>() / v.len() as f64);

    Ok(RunResponse {
        return_code: 0,
        n,
        seed,
        rounds: out.records,
        final_mean_p_c,
    })
}
