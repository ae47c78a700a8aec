pub mod common;
pub mod geocode;
pub mod health;
pub mod leads;
pub mod quotes;
pub mod sessions;
pub mod solar_data;

pub use geocode::post_geocode;
pub use health::{health, ready};
pub use leads::post_leads;
pub use quotes::post_quotes;
pub use sessions::{
	create_session, get_map, get_session, post_address, post_back, post_contact, post_energy,
	post_system, put_panel,
};
pub use solar_data::post_solar_data;
