pub mod actions;
mod app;
pub mod events;
pub mod input;
mod mouse;
pub mod state;
pub mod viewport;

pub use app::App;
