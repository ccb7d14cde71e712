// Domain layer: wire models and ports. No HTTP or storage code lives here.

pub mod auth;
pub mod model;
pub mod ports;
pub mod records;
