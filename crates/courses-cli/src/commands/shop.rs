use crate::SessionArgs;
use anyhow::{Context, Result};
use courses_browser::{
    CdpSession, ChromeFinder, ChromeLauncher, ChromePage, Credentials, ProfileManager,
    ShopSession, SiteConfig,
};
use std::future::Future;
use std::process::Child;
use std::time::Duration;

/// Run a command's async body on a fresh runtime
pub fn run<T>(body: impl Future<Output = Result<T>>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(body);

    // Don't hang on the CDP handler task
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

/// Chrome process, CDP connection and profile behind a shop session
pub struct ShopBrowser {
    chrome: Child,
    cdp: CdpSession,
    _profile: ProfileManager,
}

impl ShopBrowser {
    /// Launch Chrome, connect to it and log in
    pub async fn open(args: &SessionArgs) -> Result<(Self, ShopSession<ChromePage>)> {
        let chrome_binary = ChromeFinder::new(args.chrome_path.clone()).find()?;
        tracing::debug!("Using Chrome at {}", chrome_binary.display());

        let profile = match (&args.profile, args.temp) {
            (Some(name), false) => {
                let profile = ProfileManager::named(name)?;
                tracing::info!("Using profile {}", profile.path().display());
                profile
            }
            (Some(name), true) => {
                tracing::warn!("--temp given, ignoring profile '{}'", name);
                ProfileManager::temporary()?
            }
            (None, _) => ProfileManager::temporary()?,
        };

        let site = SiteConfig::new(&args.base_url, Duration::from_secs(args.timeout))?;

        let mut chrome = ChromeLauncher::new(chrome_binary, profile.path().to_path_buf())
            .with_port(args.port)
            .headless(args.headless)
            .launch()?;

        let cdp = match CdpSession::connect(args.port).await {
            Ok(cdp) => cdp,
            Err(e) => {
                let _ = chrome.kill();
                let _ = chrome.wait();
                return Err(e.into());
            }
        };

        let browser = Self {
            chrome,
            cdp,
            _profile: profile,
        };

        let credentials = Credentials::new(&args.user, &args.password);
        match ShopSession::login(browser.cdp.page(), site, &credentials).await {
            Ok(session) => Ok((browser, session)),
            Err(e) => {
                browser.close().await;
                Err(e).context("Could not log in to the shop")
            }
        }
    }

    /// Close the browser; failures are only logged
    pub async fn close(self) {
        let Self {
            mut chrome,
            cdp,
            _profile,
        } = self;

        if let Err(e) = cdp.close().await {
            tracing::debug!("Closing browser over CDP failed: {}", e);
        }

        // Chrome usually exits on its own once the browser is closed
        let _ = chrome.kill();
        let _ = chrome.wait();
    }
}
