//! API request handlers.

pub mod flights;
pub mod health;
pub mod notifications;

pub use flights::*;
pub use health::*;
pub use notifications::*;
