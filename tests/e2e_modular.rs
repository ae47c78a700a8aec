//! End-to-end tests against a server on an ephemeral port

mod e2e;
mod mocks;

mod health_tests {
	include!("e2e/health_tests.rs");
}

mod middleware_tests {
	include!("e2e/middleware_tests.rs");
}

mod quotes_tests {
	include!("e2e/quotes_tests.rs");
}

mod solar_data_tests {
	include!("e2e/solar_data_tests.rs");
}

mod wizard_tests {
	include!("e2e/wizard_tests.rs");
}

mod leads_tests {
	include!("e2e/leads_tests.rs");
}
