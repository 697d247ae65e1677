mod building_repository;

pub use building_repository::InMemoryBuildingRepository;
