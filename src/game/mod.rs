pub mod driver;
pub mod payoff;
pub mod types;
pub mod update;
