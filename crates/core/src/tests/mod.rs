//! Test helpers shared with dependent crates (enabled by the `tests` feature)

mod token;

pub use token::TestToken;
