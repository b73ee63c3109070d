pub mod mock_resolvers;
pub mod strategies;

pub use mock_resolvers::*;
