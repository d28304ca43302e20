pub mod check;
pub mod project;
pub mod reports;
pub mod show;
pub mod util;

pub use check::*;
pub use project::*;
pub use reports::*;
pub use show::*;
pub use util::*;
