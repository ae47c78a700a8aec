//! Solar Quote Service
//!
//! Pricing, panel placement, map view, quote signing, leads and the wizard
//! state machine.

pub mod integrity;
pub mod layout;
pub mod leads;
pub mod map;
pub mod pricing;
pub mod quotes;
pub mod wizard;

pub use integrity::{IntegrityError, IntegrityService, IntegrityTrait};
pub use layout::{move_panel, place_panels, Candidate, LayoutError};
pub use leads::{LeadError, LeadService};
pub use map::build_map_view;
pub use pricing::calculate_system;
pub use quotes::{QuoteService, QuoteServiceError};
pub use solar_types::IntegrityPayload;
pub use wizard::{EnergyInput, SystemInput, WizardError, WizardOptions, WizardService};
