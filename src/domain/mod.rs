// Domain layer: models and ports. Adapters and test cases depend on this, never the reverse.

pub mod model;
pub mod ports;
