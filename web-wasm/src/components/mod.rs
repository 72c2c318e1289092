pub mod action_buttons;
pub mod header;
pub mod status_banner;
pub mod upload_area;
