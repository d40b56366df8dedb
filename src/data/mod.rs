pub mod coerce;
pub mod period;
pub mod table;
