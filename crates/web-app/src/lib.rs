#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod chart;
pub mod log;
mod navigation;
mod ongoing_workout;
mod service;
mod settings;

pub use navigation::*;
pub use ongoing_workout::*;
pub use service::*;
pub use settings::*;
