// Domain layer: records, entities and the store port. No I/O here.

pub mod entities;
pub mod model;
pub mod ports;
