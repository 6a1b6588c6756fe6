pub mod placement_table;
pub mod properties;
pub mod sidebar;
pub mod status_bar;
