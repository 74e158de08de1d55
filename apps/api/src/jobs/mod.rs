pub mod adapters;
pub mod feeds;
pub mod fetch;
pub mod handlers;
pub mod mock;
pub mod models;
pub mod normalize;
pub mod rss;
