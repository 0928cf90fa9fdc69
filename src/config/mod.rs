//! Configuration module

mod site;

pub use site::CommentsConfig;
pub use site::HighlightConfig;
pub use site::NotifyConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
