pub mod http;
pub mod simulated;

pub use http::HttpGateway;
pub use simulated::SimulatedGateway;
