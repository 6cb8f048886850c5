use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::core::ledger_manager::TransactionLedger;
use crate::core::services::{BookingSource, MockBookingSource};
use crate::errors::CliError;
use crate::pricing::{PricingCalculator, RoomCatalog};
use crate::storage::JsonFileStore;

/// Everything a single command invocation works against.
pub struct CliContext {
    pub config: Config,
    pub base_dir: PathBuf,
    pub ledger: TransactionLedger,
    pub pricing: PricingCalculator,
    pub bookings: Box<dyn BookingSource>,
}

impl CliContext {
    pub fn open() -> Result<Self, CliError> {
        Self::open_with(&ConfigManager::new()?)
    }

    pub fn open_with(manager: &ConfigManager) -> Result<Self, CliError> {
        let config = manager.load()?;
        if !manager.config_path().exists() {
            manager.save(&config)?;
            debug!(path = %manager.config_path().display(), "wrote default configuration");
        }
        let base_dir = manager.base_dir().to_path_buf();
        let ledger_dir = config.ledger_dir(&base_dir);
        debug!(path = %ledger_dir.display(), "opening ledger store");

        let store = JsonFileStore::new(ledger_dir)?;
        let (ledger, report) = TransactionLedger::open(Box::new(store), config.storage_key.clone());
        if let Some(err) = &report.recovered_from {
            output::warning(format!(
                "Saved data for `{}` could not be read ({err}); starting with an empty ledger.",
                report.key
            ));
            if let Some(copy) = &report.preserved_copy {
                output::warning(format!("The unreadable data was copied to {copy}"));
            }
        }

        let pricing = PricingCalculator::new(RoomCatalog::default(), config.extra_guest_unit_price);
        Ok(Self {
            config,
            base_dir,
            ledger,
            pricing,
            bookings: Box::new(MockBookingSource::default()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }
}
