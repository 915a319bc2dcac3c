//! Command handlers, one module per subcommand.

pub mod check;
pub mod completion;
pub mod eval;
pub mod init;
pub mod labor;
pub mod quote;
pub mod resolve;
pub mod version;
