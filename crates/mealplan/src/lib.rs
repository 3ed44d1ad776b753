mod scheduler;
mod scorer;

pub use scheduler::*;
pub use scorer::*;
