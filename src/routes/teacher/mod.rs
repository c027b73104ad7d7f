mod handler;
mod model;

pub use handler::{find_all, find_by_id};
pub use model::TeacherDto;
