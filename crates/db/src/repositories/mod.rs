//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or, for transactional lifecycle operations, an
//! open transaction) as the first argument.

pub mod assignee_repo;
pub mod asset_repo;
pub mod building_repo;
pub mod floor_repo;
pub mod import_repo;
pub mod room_repo;
pub mod scan_event_repo;
pub mod seed;
pub mod user_repo;

pub use assignee_repo::AssigneeRepo;
pub use asset_repo::AssetRepo;
pub use building_repo::BuildingRepo;
pub use floor_repo::FloorRepo;
pub use import_repo::ImportRepo;
pub use room_repo::RoomRepo;
pub use scan_event_repo::ScanEventRepo;
pub use seed::ensure_sentinels;
pub use user_repo::UserRepo;
