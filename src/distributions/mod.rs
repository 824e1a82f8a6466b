// Discrete
pub mod Poisson;
