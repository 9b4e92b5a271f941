//! UIコンポーネント

pub mod chat_input;
pub mod header;
pub mod image_picker;
pub mod response_panel;
pub mod send_button;
