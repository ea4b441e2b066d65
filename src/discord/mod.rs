//! Discord adapters: gateway event dispatch and the thread surface.

pub mod gateway;
pub mod surface;

pub use surface::DiscordSurface;
