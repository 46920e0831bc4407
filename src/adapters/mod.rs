// Adapters layer: concrete implementations of the domain ports (storage, timers, simulated services).

pub mod clock;
pub mod mock_analyzer;
pub mod mock_assistant;
pub mod scheduler;
pub mod speech;
pub mod storage;
