pub mod build;
pub mod component;
pub mod constraints;
