use std::{fs, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{fs::config_dir, repository::entities::Quantity};

const FILE_NAME: &str = "core.toml";

/// Handle to the backend's core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The backend's core configuration, serialized to TOML.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Quantity a freshly opened editor starts from
    pub default_quantity: Quantity,
}

impl CoreConfig {
    pub fn load() -> Self {
        let path = config_dir().join(FILE_NAME);

        if path.exists() {
            let contents = fs::read_to_string(path).unwrap();
            toml::from_str(&contents).unwrap_or_default()
        } else {
            let cfg = Self::default();
            cfg.save();
            cfg
        }
    }

    pub fn save(&self) {
        let contents = toml::to_string_pretty(self).unwrap();

        // Make sure config_dir exists
        fs::create_dir_all(config_dir()).unwrap();

        fs::write(config_dir().join(FILE_NAME), contents).unwrap();
    }

    #[cfg(test)]
    pub(crate) fn mock() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let cfg = CoreConfig {
            default_quantity: Quantity::Three,
        };

        let contents = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CoreConfig = toml::from_str(&contents).unwrap();

        assert_eq!(parsed.default_quantity, Quantity::Three);
    }

    #[test]
    fn test_unknown_quantity_rejected() {
        assert!(toml::from_str::<CoreConfig>("default_quantity = 12").is_err());
    }
}
