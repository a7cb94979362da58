// Domain layer: value types, presentation lookup and ports. No I/O here.

pub mod advice;
pub mod model;
pub mod ports;
