// Domain layer: route table, month lookup and the ports the proxy talks through.

pub mod calendar;
pub mod model;
pub mod ports;
