pub mod db;
pub mod utils;
