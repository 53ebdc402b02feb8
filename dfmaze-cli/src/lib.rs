pub mod app;
pub mod game;
pub mod logging;
pub mod renderer;
pub mod settings;
