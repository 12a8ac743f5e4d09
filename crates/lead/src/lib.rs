mod deep_link;
mod form;
mod input;
mod registry;
mod remote_api;
mod strategy;

pub use deep_link::*;
pub use form::*;
pub use input::*;
pub use registry::*;
pub use remote_api::*;
pub use strategy::*;
