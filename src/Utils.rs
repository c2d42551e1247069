//! different utility modules used throughout the project
/// tiny module to save solution and convergence data into files
pub mod logger;
/// tiny module to plot result of IVP computation
pub mod plots;
