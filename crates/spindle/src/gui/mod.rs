pub mod app;
pub mod audio;
pub mod theme;
pub mod wheel;
pub mod window;
