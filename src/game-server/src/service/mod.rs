pub mod game_manager;
