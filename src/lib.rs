use std::sync::Arc;

use config::Config;
use geo::TravelSpeedService;

pub mod config;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod session;
pub mod utils;

pub use router::create_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<TravelSpeedService>,
}

impl AppState {
    pub fn new(config: Config, service: TravelSpeedService) -> Self {
        Self {
            config,
            service: Arc::new(service),
        }
    }
}
