pub mod error;
pub mod integrity;
pub mod model;
pub mod output;
pub mod risk;
pub mod seed;
pub mod store;
pub mod summary;
