//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::SiteConfig;
pub use site::TOKEN_ENV_VAR;
