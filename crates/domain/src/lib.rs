#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod history;
mod plan;
mod service;
mod statistics;
mod value;
mod workout;

pub use error::*;
pub use history::*;
pub use plan::*;
pub use service::*;
pub use statistics::*;
pub use value::*;
pub use workout::*;
