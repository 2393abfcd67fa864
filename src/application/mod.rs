mod application;
pub mod data;
mod runtime_config;

pub use application::{Application, ApplicationError};
