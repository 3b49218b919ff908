// Lot, room and layout types plus the storage/pipeline traits the engine runs on.

pub mod model;
pub mod ports;
