#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use upstream_settings_core as core;
pub use upstream_settings_k8s_api as k8s;

mod args;
mod manifest;
mod validation;

pub use self::args::Args;
