pub mod buses;
pub mod classify;
pub mod common;
pub mod evaluate;
pub mod sweep;
