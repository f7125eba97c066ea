pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod predictor;
pub mod season;
pub mod seed;
pub mod simulator;
pub mod standings;
pub mod store;

pub use error::{LeagueError, Result};
pub use season::League;
