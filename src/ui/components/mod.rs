pub mod progress_bar;
pub mod stats_panel;
pub mod typing_area;
