//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::CollectionConfig;
pub use site::CollectionLayout;
pub use site::HomeConfig;
pub use site::NotFoundConfig;
pub use site::OgConfig;
pub use site::PageConfig;
pub use site::SiteConfig;
