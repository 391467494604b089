pub mod atr;
pub mod bar;
pub mod error;
pub mod reconcile;
pub mod store;
pub mod tools;

pub use bar::{Bar, RawBar};
pub use error::SeriesError;
pub use store::{BarSource, SeriesStore, UpdateMode};
pub use tools::{Anchored, ToolManager};
