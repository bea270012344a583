pub mod abundance;
pub mod errors;
pub mod filtering;
pub mod hashing;
pub mod histogram;
pub mod report;
pub mod serialization;

pub use crate::serialization::{load_signatures, open_signature_file};
