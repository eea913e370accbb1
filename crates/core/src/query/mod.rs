pub mod engine;
pub mod model;

pub use engine::QueryEngine;
pub use model::SearchOptions;
