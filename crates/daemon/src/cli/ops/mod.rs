pub mod get;
pub mod ls;
pub mod stat;
pub mod tree;

pub use get::Get;
pub use ls::Ls;
pub use stat::Stat;
pub use tree::Tree;
