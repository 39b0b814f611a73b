//! High-level entry point.

use std::path::Path;

use crate::config::{ConfigError, ResManConfig, ValidatedConfig};
use crate::connector::{ReqwestClient, ResManConnector};
use crate::resources::{Accounts, Employees, Notes, PickLists, Properties, Residents, WorkOrders};
use crate::time::{Clock, SystemClock, TokioSleeper};

/// ResMan partner API client.
///
/// Owns the [`ResManConnector`] and hands out borrowed views that group the
/// endpoints by resource. The views are cheap to create; call the accessor
/// each time rather than storing the result.
///
/// # Example
///
/// ```no_run
/// use resman_client::{ResManClient, ResManConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ResManClient::new(&ResManConfig::new("partner-id", "api-key", "account-id"))?;
///
/// for property in client.properties().get_properties().await? {
///     println!("{} ({})", property.name, property.property_id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ResManClient<H = ReqwestClient, S = TokioSleeper> {
    connector: ResManConnector<H, S>,
    clock: Box<dyn Clock>,
}

impl ResManClient<ReqwestClient, TokioSleeper> {
    /// Validates `settings` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] naming the first missing
    /// credential, or any other validation failure. No request is sent.
    pub fn new(settings: &ResManConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_connector(ResManConnector::from_settings(settings)?))
    }

    /// Creates a client from `settings` layered over the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or the
    /// merged configuration is invalid.
    pub fn from_file(settings: &ResManConfig, path: &Path) -> Result<Self, ConfigError> {
        let config = ValidatedConfig::load(settings, path)?;
        Ok(Self::from_connector(ResManConnector::new(config)?))
    }
}

impl<H, S> ResManClient<H, S> {
    /// Wraps an existing connector.
    #[must_use]
    pub fn from_connector(connector: ResManConnector<H, S>) -> Self {
        Self {
            connector,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used to validate date filters.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The underlying connector, for endpoints without a resource view.
    #[must_use]
    pub const fn connector(&self) -> &ResManConnector<H, S> {
        &self.connector
    }

    #[must_use]
    pub const fn accounts(&self) -> Accounts<'_, H, S> {
        Accounts::new(&self.connector)
    }

    #[must_use]
    pub const fn employees(&self) -> Employees<'_, H, S> {
        Employees::new(&self.connector)
    }

    #[must_use]
    pub const fn notes(&self) -> Notes<'_, H, S> {
        Notes::new(&self.connector)
    }

    #[must_use]
    pub const fn pick_lists(&self) -> PickLists<'_, H, S> {
        PickLists::new(&self.connector)
    }

    #[must_use]
    pub const fn properties(&self) -> Properties<'_, H, S> {
        Properties::new(&self.connector)
    }

    #[must_use]
    pub const fn residents(&self) -> Residents<'_, H, S> {
        Residents::new(&self.connector)
    }

    #[must_use]
    pub fn work_orders(&self) -> WorkOrders<'_, H, S> {
        WorkOrders::new(&self.connector, &*self.clock)
    }

    /// Replaces the integration partner id and API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if either value is empty.
    pub fn update_credentials(
        &self,
        integration_partner_id: &str,
        api_key: &str,
    ) -> Result<(), ConfigError> {
        self.connector
            .update_credentials(integration_partner_id, api_key)
    }

    /// Switches the client to another account.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the account id is empty or unusable as a
    /// header value.
    pub fn update_account_id(&self, account_id: &str) -> Result<(), ConfigError> {
        self.connector.update_account_id(account_id)
    }

    #[must_use]
    pub fn account_id(&self) -> String {
        self.connector.account_id()
    }
}

impl<H: std::fmt::Debug, S: std::fmt::Debug> std::fmt::Debug for ResManClient<H, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResManClient")
            .field("connector", &self.connector)
            .finish_non_exhaustive()
    }
}
