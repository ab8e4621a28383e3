pub mod boundary;
pub mod health;
