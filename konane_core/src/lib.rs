pub mod arena;
pub mod engine;
pub mod logic;
pub mod player;
