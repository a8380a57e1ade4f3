pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod headers;
pub mod sink;
pub mod tokens;
pub mod transport;

pub use client::{LoginStage, ZacClient};
pub use config::{ClientOptions, ZacConfig};
pub use endpoints::DEFAULT_BASE_URL;
pub use error::Error;
pub use sink::{BodySink, FileSink};
pub use transport::Page;
