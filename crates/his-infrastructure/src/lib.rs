pub mod config_service;
pub mod http_gateway;
pub mod paths;

pub use config_service::ConfigService;
pub use http_gateway::HttpGateway;
pub use paths::HisPaths;
