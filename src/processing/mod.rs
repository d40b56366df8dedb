pub mod analysis;
pub mod outliers;
pub mod reshape;
pub mod statistics;
