pub mod boundary;
pub mod coordinate;
pub mod submission;
