//! Domain and URL helpers shared by the services.

pub mod domain_replace;
pub mod root_domain;
pub mod url_scheme;
