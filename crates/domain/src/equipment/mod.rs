mod entity;
mod equipment_type;
mod status;

pub use entity::Equipment;
pub use equipment_type::EquipmentType;
pub use status::EquipmentStatus;
