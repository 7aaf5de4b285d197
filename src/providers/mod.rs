pub mod exchangerate_host;
pub mod open_er_api;
pub mod util;

pub use exchangerate_host::ExchangeRateHostProvider;
pub use open_er_api::OpenErApiProvider;
