//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod client_credential_token_provider;
mod graph_directory_client;
mod in_memory_directory_response_cache;
mod in_memory_selection_store;

#[cfg(test)]
mod test_server;

pub use client_credential_token_provider::{
    ClientCredentialTokenProvider, DEFAULT_AUTHORITY_HOST, DEFAULT_GRAPH_SCOPE,
};
pub use graph_directory_client::{DEFAULT_GRAPH_BASE_URL, GraphDirectoryClient, UserPager};
pub use in_memory_directory_response_cache::InMemoryDirectoryResponseCache;
pub use in_memory_selection_store::InMemorySelectionStore;
