#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod policy;

pub use k8s_openapi::{api::core::v1::Service, apimachinery::pkg::apis::meta::v1::ObjectMeta};
pub use kube::{CustomResourceExt, Resource, ResourceExt};
