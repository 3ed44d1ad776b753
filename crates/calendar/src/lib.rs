mod date;
mod export;
mod ics;

pub use date::*;
pub use export::*;
pub use ics::*;
