pub mod explore_dependencies;

pub use explore_dependencies::ExploreDependenciesUseCase;
