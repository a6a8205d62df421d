pub mod echo;
pub mod health;
