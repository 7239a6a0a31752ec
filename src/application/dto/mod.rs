pub mod explore_request;
pub mod explore_response;

pub use explore_request::{ExploreOptions, ExploreQuery, ExploreRequest};
pub use explore_response::{ExploreOutcome, RootSummary};
