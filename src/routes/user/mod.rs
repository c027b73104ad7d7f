mod handler;
mod model;

pub use handler::{delete, find_by_id};
pub use model::UserDto;
