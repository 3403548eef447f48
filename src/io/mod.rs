pub mod adjacency;
pub mod results;
