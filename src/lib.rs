pub mod math;
pub mod net;
pub mod model;
pub mod game;
pub mod io;
pub mod calibration;

pub use game::driver::{run_coupled, CoupledRun, EpidemicEngine, RoundRecord, RunConfig};
pub use game::payoff::{CompoundState, TransitionTable};
pub use game::types::{SimplexAudit, TypeMatrix};
pub use model::mmca::{CoopSeed, EpidemicConfig, MmcaModel, Trajectories};
pub use net::Network;
