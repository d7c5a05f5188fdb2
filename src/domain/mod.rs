// Domain layer: matrix models and ports (interfaces).

pub mod model;
pub mod ports;
