pub mod associations;
pub mod skills;
pub mod users;
