mod handler;
mod model;

pub use handler::{
    create, delete, find_all, find_by_id, no_longer_participate, participate, update,
};
pub use model::SessionDto;
