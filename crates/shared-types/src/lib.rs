pub mod error;
pub mod feature_flags;

pub mod application;
pub mod auth;
pub mod blog;
pub mod common;
pub mod contact;
pub mod content;
pub mod dashboard;
pub mod event;
pub mod export;
pub mod fallback;
pub mod newsletter;
pub mod notify;
pub mod product;
pub mod testimonial;
pub mod upload;

pub use error::*;
pub use feature_flags::*;

pub use application::*;
pub use auth::*;
pub use blog::*;
pub use common::*;
pub use contact::*;
pub use content::*;
pub use dashboard::*;
pub use event::*;
pub use export::*;
pub use newsletter::*;
pub use notify::*;
pub use product::*;
pub use testimonial::*;
pub use upload::*;
// `fallback` is not glob re-exported: its functions (`events`, `products`, ...)
// read better qualified as `fallback::events()`.
