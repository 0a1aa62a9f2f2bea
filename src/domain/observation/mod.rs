//! Observation domain - Uploaded tables of KOI observations

mod table;

pub use table::ObservationTable;
