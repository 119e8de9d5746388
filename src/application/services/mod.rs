pub mod admission_service;
pub mod assignment_service;
pub mod capacity;
pub mod liveness_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use admission_service::*;
pub use assignment_service::*;
pub use capacity::*;
pub use liveness_service::*;
