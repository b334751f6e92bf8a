pub mod file;
pub mod group;
