//! Game implementations.

pub mod classic;
