use crate::selectors::{self, SiteConfig};
use crate::{Error, PageDriver, Result};
use chrono::NaiveDateTime;
use courses_core::{
    Basket, DeliverySlotTable, DeliverySlotValidator, Item, ReorderPlan, SlotCell, SlotStatus,
    UnavailableItems, plan_empty, plan_reorder,
};
use std::fmt;

/// Shop account login
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

/// One logged-in shopping run: the page, the basket as last read or
/// modified, and the previous-order items found unavailable so far
pub struct ShopSession<D> {
    driver: D,
    site: SiteConfig,
    basket: Basket,
    unavailable: UnavailableItems,
}

impl<D: PageDriver> ShopSession<D> {
    /// Session on a page that is already logged in
    pub fn new(driver: D, site: SiteConfig) -> Self {
        Self {
            driver,
            site,
            basket: Basket::new(),
            unavailable: UnavailableItems::new(),
        }
    }

    /// Log in and read the current basket
    pub async fn login(driver: D, site: SiteConfig, credentials: &Credentials) -> Result<Self> {
        let mut session = Self::new(driver, site);
        let timeout = session.site.timeout();

        tracing::info!("Logging in as {}", credentials.user);
        session.driver.goto(&session.site.url(selectors::LOGIN_PATH)?).await?;
        session.driver.wait_for(selectors::EMAIL_INPUT, timeout).await?;
        session
            .driver
            .fill(selectors::EMAIL_INPUT, &credentials.user)
            .await?;
        session
            .driver
            .fill(selectors::PASSWORD_INPUT, &credentials.password)
            .await?;
        session.driver.click(selectors::LOGIN_SUBMIT).await?;

        if let Err(e) = session.driver.wait_for(selectors::ACCOUNT_MENU, timeout).await {
            let message = session
                .driver
                .query_all(selectors::LOGIN_ERROR, &[])
                .await
                .ok()
                .and_then(|nodes| {
                    nodes
                        .into_iter()
                        .map(|node| node.text)
                        .find(|text| !text.trim().is_empty())
                })
                .unwrap_or_else(|| e.to_string());
            return Err(Error::Login(message.trim().to_string()));
        }

        session.refresh_basket().await?;
        Ok(session)
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn unavailable_items(&self) -> &UnavailableItems {
        &self.unavailable
    }

    #[cfg(test)]
    pub(crate) fn driver(&self) -> &D {
        &self.driver
    }

    /// Re-read the basket from the basket page
    pub async fn refresh_basket(&mut self) -> Result<&Basket> {
        self.driver.goto(&self.site.url(selectors::BASKET_PATH)?).await?;

        let nodes = self
            .driver
            .query_all(selectors::BASKET_ITEM, &[selectors::PRODUCT_ID_ATTR])
            .await?;

        self.basket = nodes
            .into_iter()
            .filter_map(|node| {
                let id = node.attribute(selectors::PRODUCT_ID_ATTR)?.to_string();
                Some((id, node.text))
            })
            .collect();

        tracing::info!("Basket holds {} item(s)", self.basket.len());
        Ok(&self.basket)
    }

    /// Remove every basket line; returns how many were removed
    pub async fn empty_basket(&mut self) -> Result<usize> {
        let ids = plan_empty(&self.basket);
        for id in &ids {
            tracing::debug!("Removing {} ({:?})", id, self.basket.description(id));
            self.driver.click(&selectors::remove_button(id)).await?;
        }
        self.basket.clear();

        tracing::info!("Removed {} item(s) from the basket", ids.len());
        Ok(ids.len())
    }

    /// Items of the `index`-th most recent order (1 = latest)
    pub async fn previous_order_items(&self, index: usize) -> Result<Vec<Item>> {
        let timeout = self.site.timeout();
        self.driver.goto(&self.site.url(selectors::ORDERS_PATH)?).await?;

        let link = selectors::order_link(index);
        self.driver.wait_for(&link, timeout).await?;
        self.driver.click(&link).await?;
        self.driver.wait_for(selectors::ORDER_ITEM, timeout).await?;

        let nodes = self
            .driver
            .query_all(
                selectors::ORDER_ITEM,
                &[selectors::PRODUCT_ID_ATTR, selectors::CLASS_ATTR],
            )
            .await?;

        let items: Vec<Item> = nodes
            .into_iter()
            .map(|node| {
                let available = !node
                    .attribute(selectors::CLASS_ATTR)
                    .unwrap_or_default()
                    .split_whitespace()
                    .any(|c| c == selectors::UNAVAILABLE_CLASS);
                let id = node.attribute(selectors::PRODUCT_ID_ATTR).unwrap_or_default();
                Item::new(node.text.as_str(), available, id)
            })
            .collect();

        tracing::info!("Previous order #{} has {} item(s)", index, items.len());
        Ok(items)
    }

    /// Put the still-available items of a previous order back in the basket
    pub async fn add_previous_order_to_basket(&mut self, index: usize) -> Result<ReorderPlan> {
        let items = self.previous_order_items(index).await?;
        let plan = plan_reorder(&items, &self.basket);

        for item in &plan.additions {
            tracing::debug!("Adding '{}'", item.description());
            self.driver.click(&selectors::add_button(item.id())).await?;
            self.basket.insert(item.id(), item.description());
        }

        for description in &plan.unavailable {
            if self.unavailable.record(description.as_str()) {
                tracing::warn!("'{}' is no longer available", description);
            }
        }

        tracing::info!(
            "Added {} item(s), {} unavailable",
            plan.additions.len(),
            plan.unavailable.len()
        );
        Ok(plan)
    }

    /// Read the delivery slot grid
    pub async fn delivery_slots(&self) -> Result<DeliverySlotTable> {
        self.driver.goto(&self.site.url(selectors::DELIVERY_PATH)?).await?;
        self.driver
            .wait_for(selectors::SLOT_CELLS, self.site.timeout())
            .await?;

        let nodes = self
            .driver
            .query_all(
                selectors::SLOT_CELLS,
                &[selectors::SLOT_HEADERS_ATTR, selectors::CLASS_ATTR],
            )
            .await?;

        let mut table = DeliverySlotTable::new();
        for node in nodes {
            let Some(headers) = node.attribute(selectors::SLOT_HEADERS_ATTR) else {
                continue;
            };
            match headers.parse::<SlotCell>() {
                Ok(cell) => {
                    let class = node.attribute(selectors::CLASS_ATTR).unwrap_or_default();
                    table.insert(cell, SlotStatus::from_class(class));
                }
                Err(_) => tracing::debug!("Ignoring slot cell with headers '{}'", headers),
            }
        }

        tracing::debug!("Read {} slot cell(s)", table.len());
        Ok(table)
    }

    /// Book the delivery slot for `candidate`
    pub async fn set_delivery_time(
        &self,
        now: NaiveDateTime,
        candidate: NaiveDateTime,
    ) -> Result<SlotCell> {
        // Reject out-of-range dates before loading the page
        let cell = DeliverySlotValidator::check_window(now, candidate)?;

        self.driver.goto(&self.site.url(selectors::DELIVERY_PATH)?).await?;
        let status = self.slot_status(cell).await?;
        let table: DeliverySlotTable = std::iter::once((cell, status)).collect();
        let cell = DeliverySlotValidator::validate(now, candidate, &table)?;

        self.driver.click(&selectors::slot_cell(cell)).await?;
        tracing::info!("Delivery booked for {} (slot {})", candidate, cell);
        Ok(cell)
    }

    /// Status of one cell of the delivery page already loaded
    async fn slot_status(&self, cell: SlotCell) -> Result<SlotStatus> {
        let selector = selectors::slot_cell(cell);
        match self.driver.wait_for(&selector, self.site.timeout()).await {
            Ok(()) => {}
            Err(Error::Timeout(_)) => {
                tracing::debug!("No slot cell {} on the delivery page", cell);
                return Ok(SlotStatus::Missing);
            }
            Err(e) => return Err(e),
        }

        let class = self
            .driver
            .attribute(&selector, selectors::CLASS_ATTR)
            .await?
            .unwrap_or_default();
        Ok(SlotStatus::from_class(&class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakePage;
    use crate::Node;
    use chrono::{Duration, Timelike};
    use courses_core::Rejection;

    fn shop(page: FakePage) -> ShopSession<FakePage> {
        ShopSession::new(page, SiteConfig::default())
    }

    fn basket_node(id: &str, description: &str) -> Node {
        Node::new(description).with_attribute(selectors::PRODUCT_ID_ATTR, id)
    }

    fn order_node(id: &str, description: &str, available: bool) -> Node {
        let class = if available {
            "product-name"
        } else {
            "product-name indisponible"
        };
        Node::new(description)
            .with_attribute(selectors::PRODUCT_ID_ATTR, id)
            .with_attribute(selectors::CLASS_ATTR, class)
    }

    fn slot_node(headers: &str, class: &str) -> Node {
        Node::new("")
            .with_attribute(selectors::SLOT_HEADERS_ATTR, headers)
            .with_attribute(selectors::CLASS_ATTR, class)
    }

    fn page_with_basket() -> FakePage {
        FakePage::new().with_nodes(
            selectors::BASKET_ITEM,
            vec![basket_node("1", "beurre"), basket_node("2", "lait")],
        )
    }

    fn page_with_slots() -> FakePage {
        let cells = [
            ("h3 j1", "nondispo"),
            ("h3 j2", "libre"),
            ("h5 j3", "nondispo"),
            ("h6 j3", "libre"),
            ("h8 j3", "nondispo"),
        ];

        let mut page = FakePage::new().with_nodes(
            selectors::SLOT_CELLS,
            cells.iter().map(|(h, c)| slot_node(h, c)).collect(),
        );
        for (headers, class) in cells {
            let cell: SlotCell = headers.parse().unwrap();
            page = page.with_nodes(&selectors::slot_cell(cell), vec![slot_node(headers, class)]);
        }
        page
    }

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 45, 0)
            .unwrap()
    }

    fn days_ahead_at(days: i64, hour: u32) -> NaiveDateTime {
        (now() + Duration::days(days)).with_hour(hour).unwrap()
    }

    #[tokio::test]
    async fn test_login_fills_form_and_reads_basket() {
        let credentials = Credentials::new("user@example.com", "pass");
        let session = ShopSession::login(page_with_basket(), SiteConfig::default(), &credentials)
            .await
            .unwrap();

        let page = session.driver();
        assert_eq!(
            page.filled(),
            vec![
                (selectors::EMAIL_INPUT.to_string(), "user@example.com".to_string()),
                (selectors::PASSWORD_INPUT.to_string(), "pass".to_string()),
            ]
        );
        assert_eq!(page.clicks(), vec![selectors::LOGIN_SUBMIT.to_string()]);
        assert_eq!(session.basket().len(), 2);
        assert_eq!(session.basket().description("2"), Some("lait"));
    }

    #[tokio::test]
    async fn test_login_failure_reports_site_message() {
        let page = page_with_basket()
            .without(selectors::ACCOUNT_MENU)
            .with_nodes(selectors::LOGIN_ERROR, vec![Node::new(" Mot de passe incorrect ")]);

        let result =
            ShopSession::login(page, SiteConfig::default(), &Credentials::new("u", "p")).await;

        match result {
            Err(Error::Login(message)) => assert_eq!(message, "Mot de passe incorrect"),
            other => panic!("expected login error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_emptying_basket() {
        let mut session = shop(page_with_basket());
        session.refresh_basket().await.unwrap();

        let removed = session.empty_basket().await.unwrap();

        assert_eq!(removed, 2);
        let clicks = session.driver().clicks();
        assert_eq!(clicks.len(), 2);
        assert!(clicks.contains(&"button[id=\"1\"]".to_string()));
        assert!(clicks.contains(&"button[id=\"2\"]".to_string()));
        assert_eq!(session.basket().len(), 0);
    }

    #[tokio::test]
    async fn test_add_order_to_basket() {
        let page = FakePage::new().with_nodes(
            selectors::ORDER_ITEM,
            vec![
                order_node("23", "Heudeubert - Biscottes", true),
                order_node("-1", "Printemps - Carottes", false),
                order_node("32", "Danone - Yaourt", true),
            ],
        );
        let mut session = shop(page);

        let plan = session.add_previous_order_to_basket(1).await.unwrap();

        assert_eq!(plan.additions.len(), 2);
        assert!(session.basket().contains_description("Heudeubert - Biscottes"));
        assert!(session.basket().contains_description("Danone - Yaourt"));
        assert!(!session.basket().contains_description("Printemps - Carottes"));
        assert!(session.unavailable_items().contains("Printemps - Carottes"));
        assert_eq!(session.unavailable_items().len(), 1);

        let clicks = session.driver().clicks();
        assert_eq!(
            clicks,
            vec![
                selectors::order_link(1),
                selectors::add_button("23"),
                selectors::add_button("32"),
            ]
        );
    }

    #[tokio::test]
    async fn test_replaying_an_order_twice_adds_nothing_new() {
        let page = FakePage::new().with_nodes(
            selectors::ORDER_ITEM,
            vec![
                order_node("23", "Heudeubert - Biscottes", true),
                order_node("-1", "Printemps - Carottes", false),
            ],
        );
        let mut session = shop(page);

        session.add_previous_order_to_basket(1).await.unwrap();
        let second = session.add_previous_order_to_basket(1).await.unwrap();

        assert!(second.additions.is_empty());
        assert_eq!(session.basket().len(), 1);
        assert_eq!(session.unavailable_items().len(), 1);
    }

    #[tokio::test]
    async fn test_delivery_slots_skip_unparsable_headers() {
        let page = page_with_slots().with_nodes(
            selectors::SLOT_CELLS,
            vec![slot_node("h3 j2", "libre"), slot_node("total", "libre")],
        );

        let table = shop(page).delivery_slots().await.unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.is_available(SlotCell::new(3, 2)));
    }

    #[tokio::test]
    async fn test_picking_delivery_slots() {
        let session = shop(page_with_slots());

        let rejection = |result: Result<SlotCell>| match result {
            Err(Error::Core(e)) => e.rejection().cloned(),
            _ => None,
        };

        let too_soon = session.set_delivery_time(now(), days_ahead_at(1, 9)).await;
        assert!(matches!(rejection(too_soon), Some(Rejection::TooSoon { .. })));

        let too_late = session.set_delivery_time(now(), now() + Duration::days(6)).await;
        assert!(matches!(rejection(too_late), Some(Rejection::TooLate { .. })));

        for hour in [6, 22] {
            let result = session.set_delivery_time(now(), days_ahead_at(2, hour)).await;
            assert!(matches!(
                rejection(result),
                Some(Rejection::OutsideServiceHours { .. })
            ));
        }

        let cell = session
            .set_delivery_time(now(), days_ahead_at(2, 9))
            .await
            .unwrap();
        assert_eq!(cell, SlotCell::new(3, 2));

        let unavailable = session.set_delivery_time(now(), days_ahead_at(3, 11)).await;
        assert!(matches!(
            rejection(unavailable),
            Some(Rejection::SlotUnavailable { .. })
        ));

        let cell = session
            .set_delivery_time(now(), days_ahead_at(3, 12))
            .await
            .unwrap();
        assert_eq!(cell, SlotCell::new(6, 3));

        let unavailable = session.set_delivery_time(now(), days_ahead_at(3, 13)).await;
        assert!(matches!(
            rejection(unavailable),
            Some(Rejection::SlotUnavailable { .. })
        ));

        // Only the two accepted slots were clicked
        assert_eq!(
            session.driver().clicks(),
            vec![
                "td[headers=\"h3 j2\"]".to_string(),
                "td[headers=\"h6 j3\"]".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_booking_reads_only_the_requested_cell() {
        let cell = SlotCell::new(3, 2);
        let page = FakePage::new()
            .without(selectors::SLOT_CELLS)
            .with_nodes(&selectors::slot_cell(cell), vec![slot_node("h3 j2", "libre")]);
        let session = shop(page);

        let booked = session
            .set_delivery_time(now(), days_ahead_at(2, 9))
            .await
            .unwrap();

        assert_eq!(booked, cell);
        assert_eq!(session.driver().clicks(), vec![selectors::slot_cell(cell)]);
    }

    #[tokio::test]
    async fn test_booking_a_cell_missing_from_the_page() {
        let page = FakePage::new().without(&selectors::slot_cell(SlotCell::new(3, 2)));
        let session = shop(page);

        let result = session.set_delivery_time(now(), days_ahead_at(2, 9)).await;

        match result {
            Err(Error::Core(e)) => assert!(matches!(
                e.rejection(),
                Some(Rejection::SlotUnavailable {
                    status: SlotStatus::Missing,
                    ..
                })
            )),
            other => panic!("expected a rejected slot, got {:?}", other),
        }
        assert!(session.driver().clicks().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_window_dates_do_not_load_the_grid() {
        let session = shop(page_with_slots());

        let _ = session.set_delivery_time(now(), days_ahead_at(1, 9)).await;

        assert!(session.driver().visited().is_empty());
    }
}
