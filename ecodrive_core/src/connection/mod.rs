mod simulator;

pub use simulator::*;
