mod facade_server;
mod handlers;

pub use facade_server::{AppState, FacadeServer};
