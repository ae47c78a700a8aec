pub mod limits;
pub mod providers;
