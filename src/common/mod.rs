mod fs;
mod io;

pub(crate) use fs::*;
pub use io::*;
