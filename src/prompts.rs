mod system;

pub use system::{PERSONA, coach_exchange, system};
