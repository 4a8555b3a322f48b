#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod upstream_settings;

pub use self::upstream_settings::{Policy, Processor, UpstreamSettings};
