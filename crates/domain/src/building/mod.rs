mod aggregate;
pub mod compatibility;
mod floor;
mod repository;
mod room;
mod status;

pub use aggregate::Building;
pub use floor::{Floor, FloorType};
pub use repository::BuildingRepository;
pub use room::{Room, RoomType};
pub use status::BuildingStatus;
