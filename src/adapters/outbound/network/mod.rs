pub mod caching_listing_client;
pub mod listing_client;
pub mod osv_client;
pub mod registry_client;

pub use caching_listing_client::CachingDependencyListing;
pub use listing_client::HttpDependencyListing;
pub use osv_client::OsvQueryClient;
pub use registry_client::{RegistryEndpoints, RegistryVersionResolver};
