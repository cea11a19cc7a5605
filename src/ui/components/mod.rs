pub mod chat_area;
pub mod demo_panel;
pub mod input_bar;
pub mod notifications;
pub mod sidebar;
