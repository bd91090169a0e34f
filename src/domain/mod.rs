// Domain layer: models and ports (interfaces). No transport concerns beyond serde.

pub mod model;
pub mod ports;
