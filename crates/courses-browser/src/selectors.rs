//! Pages and element locators of the Monoprix groceries site.

use crate::Result;
use courses_core::SlotCell;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://courses.monoprix.fr";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

pub const LOGIN_PATH: &str = "/connexion";
pub const BASKET_PATH: &str = "/panier";
pub const ORDERS_PATH: &str = "/mon-compte/mes-commandes";
pub const DELIVERY_PATH: &str = "/livraison/creneaux";

pub const EMAIL_INPUT: &str = "input#email";
pub const PASSWORD_INPUT: &str = "input#password";
pub const LOGIN_SUBMIT: &str = "form#login-form button[type=\"submit\"]";
pub const LOGIN_ERROR: &str = "#login-form .error-message";
pub const ACCOUNT_MENU: &str = "#header-account-menu";

/// Product names in the basket, carrying the product id
pub const BASKET_ITEM: &str = "#basket .product-name[data-product-id]";
pub const ORDER_ITEM: &str = "#order-detail .product-name";
pub const PRODUCT_ID_ATTR: &str = "data-product-id";
pub const CLASS_ATTR: &str = "class";
/// Class set on previous-order lines that can no longer be bought
pub const UNAVAILABLE_CLASS: &str = "indisponible";

pub const SLOT_CELLS: &str = "#delivery-slots td[headers]";
pub const SLOT_HEADERS_ATTR: &str = "headers";

/// Remove button of a basket line
pub fn remove_button(id: &str) -> String {
    format!("button[id=\"{}\"]", id)
}

/// "Add to basket" button of a previous-order line
pub fn add_button(id: &str) -> String {
    format!("button.add-to-basket[data-product-id=\"{}\"]", id)
}

/// Link to the `index`-th most recent order (1 = latest)
pub fn order_link(index: usize) -> String {
    format!(".order-history li:nth-of-type({}) a.order-detail-link", index)
}

pub fn slot_cell(cell: SlotCell) -> String {
    format!("td[headers=\"{}\"]", cell.headers())
}

/// Where the site lives and how long to wait for its pages
#[derive(Debug, Clone)]
pub struct SiteConfig {
    base_url: Url,
    timeout: Duration,
}

impl SiteConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            timeout,
        })
    }

    pub fn url(&self, path: &str) -> Result<String> {
        Ok(self.base_url.join(path)?.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
