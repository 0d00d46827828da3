pub mod memory;
pub mod skill;
pub mod sqlx_repo;
pub mod store;
pub mod user;
