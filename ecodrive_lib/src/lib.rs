pub mod connection_state;
pub mod date_input;
pub mod trip;
pub mod view_mode;
