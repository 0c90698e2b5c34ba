pub mod routes;
pub mod server_state;
pub mod views;
