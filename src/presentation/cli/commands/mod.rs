pub mod check;
pub mod init;
pub mod run;

pub use check::*;
pub use init::*;
pub use run::*;
