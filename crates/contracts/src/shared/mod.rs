pub mod background;
pub mod config;
pub mod drag_drop;
pub mod error;
pub mod session;
pub mod storage;
