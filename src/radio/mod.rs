//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod rf24;
pub use rf24::{DispatchReport, Nrf24, Nrf24Error};

mod config;
pub use config::RadioConfig;

mod task;
pub use task::{RadioTask, TaskError};
