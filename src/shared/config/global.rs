use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::shared::config::model::Settings;

pub static CONFIG: Lazy<Arc<Settings>> = Lazy::new(|| Arc::new(Settings::default()));
