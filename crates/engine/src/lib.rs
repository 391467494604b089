pub mod cache;
pub mod chart;
pub mod event;
pub mod feed;
pub mod sink;
