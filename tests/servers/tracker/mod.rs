pub mod contract;
pub mod environment;

use lanswarm::servers::http::server;

pub type Started = environment::Environment<server::Running>;
