//! Configuration for the lyric engine

use serde::{Deserialize, Serialize};

use crate::algorithm::lcs::LcsAlgorithm;
use crate::algorithm::myers::MyersAlgorithm;
use crate::algorithm::patience::PatienceAlgorithm;
use crate::algorithm::DiffAlgorithm as DiffAlgoTrait;
use crate::error::{LyricError, Result};
use crate::pricing::PricingTable;
use crate::render::DEFAULT_HIGHLIGHT_CLASS;

/// Diff algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithm {
    /// Myers O(ND) algorithm
    #[default]
    Myers,
    /// Patience diff (anchors on unique tokens)
    Patience,
    /// Simple LCS-based algorithm
    Lcs,
}

impl DiffAlgorithm {
    pub fn build(self) -> Box<dyn DiffAlgoTrait> {
        match self {
            DiffAlgorithm::Myers => Box::new(MyersAlgorithm),
            DiffAlgorithm::Patience => Box::new(PatienceAlgorithm),
            DiffAlgorithm::Lcs => Box::new(LcsAlgorithm),
        }
    }
}

/// Configuration for the lyric engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Algorithm used for every diff the engine computes
    pub algorithm: DiffAlgorithm,

    /// CSS class of highlight spans in marked text
    pub highlight_class: String,

    pub pricing: PricingTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            algorithm: DiffAlgorithm::default(),
            highlight_class: DEFAULT_HIGHLIGHT_CLASS.to_string(),
            pricing: PricingTable::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_highlight_class(mut self, class: impl Into<String>) -> Self {
        self.highlight_class = class.into();
        self
    }

    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let class = self.highlight_class.trim();
        if class.is_empty() {
            return Err(LyricError::InvalidConfig("highlight class is empty".into()));
        }
        if class.contains(['"', '<', '>']) {
            return Err(LyricError::InvalidConfig(format!(
                "highlight class {:?} contains markup characters",
                self.highlight_class
            )));
        }
        if !self.pricing.is_ascending() {
            return Err(LyricError::InvalidConfig(
                "price tiers must be in ascending word-count order".into(),
            ));
        }
        Ok(())
    }
}
