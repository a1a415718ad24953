pub mod controller;
pub mod desktop;
pub mod keymap;

pub use controller::Controllers;
pub use desktop::DesktopPlatform;
