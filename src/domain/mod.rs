// Domain layer: resume models and ports (interfaces). Only serde, chrono and async-trait beyond std.

pub mod model;
pub mod ports;
