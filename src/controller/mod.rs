pub mod http_handlers;

pub use http_handlers::configure;
