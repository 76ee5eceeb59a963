pub mod config;
pub mod effect;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod grid;
pub mod input;
pub mod item;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
