pub use self::config::Config;
pub use self::errors::*;
pub use self::event_listener::EventListener;
pub use self::reporter::Reporter;

pub mod clock;
mod config;
mod errors;
pub mod event_listener;
pub mod model;
mod reporter;
pub mod run;
pub mod sink;
mod util;

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
