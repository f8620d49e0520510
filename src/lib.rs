#![warn(rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod classification;
pub mod config;
pub mod error;
pub mod handler;
pub mod healthcheck;
pub mod observability;
pub mod store;
pub mod training;

pub use classification::NewsClassifier;
pub use error::DetectorError;
pub use healthcheck::healthcheck_with_port;
