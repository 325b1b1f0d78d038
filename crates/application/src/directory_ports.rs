mod cache;
mod gateway;
mod token;

pub use cache::DirectoryResponseCache;
pub use gateway::DirectoryGateway;
pub use token::TokenProvider;
