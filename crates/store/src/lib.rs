mod catalog;
mod days;
mod kv;
mod password;
mod plan;
mod recipe;
mod session;

pub use catalog::*;
pub use days::*;
pub use kv::*;
pub use password::*;
pub use plan::*;
pub use recipe::*;
pub use session::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "fs")] {
        mod fs;

        pub use fs::*;
    }
}
