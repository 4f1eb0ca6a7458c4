pub mod clipboard;
pub mod drives;
pub mod listing;
pub mod operations;
pub mod watcher;
