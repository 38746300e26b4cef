mod cdp_session;
mod chrome_finder;
mod chrome_page;
mod driver;
mod error;
#[cfg(test)]
mod fake;
mod launcher;
mod profile;
pub mod selectors;
mod session;

pub use cdp_session::CdpSession;
pub use chrome_finder::ChromeFinder;
pub use chrome_page::ChromePage;
pub use driver::{Node, PageDriver};
pub use error::{Error, Result};
pub use launcher::{ChromeLauncher, DEFAULT_DEBUGGING_PORT};
pub use profile::ProfileManager;
pub use selectors::SiteConfig;
pub use session::{Credentials, ShopSession};
