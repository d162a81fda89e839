pub mod document;
pub mod extract;
pub mod form;
pub mod profile;
pub mod remote;

pub use document::{DocumentFormat, IntakeError, Upload};
