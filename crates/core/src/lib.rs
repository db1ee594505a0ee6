pub mod alternates;
pub mod blok;
pub mod breadcrumb;
pub mod config;
pub mod error;
pub mod image;
pub mod link;
pub mod locale;
pub mod meta;
pub mod redirect;
pub mod sitemap;
pub mod slug;
pub mod types;

pub use blok::Blok;
pub use config::{Labels, SiteConfig, parse_site_toml, parse_site_toml_str};
pub use error::{Error, Result};
pub use locale::{Locale, LocaleSet};
pub use meta::MetaTags;
pub use redirect::Decision;
pub use slug::{ResolvedSlug, RouteParams};
pub use types::*;
