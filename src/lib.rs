pub mod assets;
pub mod avatar;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod logging;
pub mod menu;
