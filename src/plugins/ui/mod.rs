pub mod debug_hud;
