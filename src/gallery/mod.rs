pub mod collection;
pub mod entry;

pub use collection::{ImageCollection, Selection};
pub use entry::{ImageEntry, Source};
