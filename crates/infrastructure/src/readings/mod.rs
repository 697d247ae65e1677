mod in_memory;
mod simulated;

pub use in_memory::InMemoryReadingSource;
pub use simulated::{SimulatedReadingSource, SimulatorConfig};
