pub mod achievements;
pub mod controller;
pub mod data_io;
pub mod scoring;
pub mod settings;
pub mod stats_manager;
pub mod storage;

pub use controller::GameController;
pub use stats_manager::StatsManager;
