//! Model pricing table
//!
//! Maps a model identifier to per-million-token input and output cost.
//! Static configuration: read-only after construction apart from explicit
//! `set_pricing` calls during setup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pricing information for a model (per million tokens)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Cost per million input tokens
    pub input_per_million: f64,
    /// Cost per million output tokens
    pub output_per_million: f64,
}

impl ModelPricing {
    /// Cost of a single call at this rate
    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let input_cost = (input_tokens as f64 / 1_000_000.0) * self.input_per_million;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * self.output_per_million;
        input_cost + output_cost
    }
}

/// Pricing table with built-in model rates
pub struct PricingTable {
    pricing: HashMap<String, ModelPricing>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingTable {
    /// Create a table seeded with built-in pricing
    pub fn new() -> Self {
        let mut pricing = HashMap::new();

        // Anthropic Claude models (as of Jan 2025)
        pricing.insert(
            "claude-3-opus".to_string(),
            ModelPricing {
                input_per_million: 15.0,
                output_per_million: 75.0,
            },
        );
        pricing.insert(
            "claude-3-5-sonnet".to_string(),
            ModelPricing {
                input_per_million: 3.0,
                output_per_million: 15.0,
            },
        );
        pricing.insert(
            "claude-3-5-haiku".to_string(),
            ModelPricing {
                input_per_million: 0.80,
                output_per_million: 4.0,
            },
        );

        // OpenAI models (as of Jan 2025)
        pricing.insert(
            "gpt-4".to_string(),
            ModelPricing {
                input_per_million: 30.0,
                output_per_million: 60.0,
            },
        );
        pricing.insert(
            "gpt-4o".to_string(),
            ModelPricing {
                input_per_million: 2.50,
                output_per_million: 10.0,
            },
        );
        pricing.insert(
            "gpt-4o-mini".to_string(),
            ModelPricing {
                input_per_million: 0.15,
                output_per_million: 0.60,
            },
        );
        pricing.insert(
            "gpt-3.5-turbo".to_string(),
            ModelPricing {
                input_per_million: 0.50,
                output_per_million: 1.50,
            },
        );

        // Google models
        pricing.insert(
            "gemini-1.5-pro".to_string(),
            ModelPricing {
                input_per_million: 1.25,
                output_per_million: 5.0,
            },
        );
        pricing.insert(
            "gemini-1.5-flash".to_string(),
            ModelPricing {
                input_per_million: 0.075,
                output_per_million: 0.30,
            },
        );

        // Mistral models
        pricing.insert(
            "mistral-large".to_string(),
            ModelPricing {
                input_per_million: 2.0,
                output_per_million: 6.0,
            },
        );
        pricing.insert(
            "mistral-small".to_string(),
            ModelPricing {
                input_per_million: 0.2,
                output_per_million: 0.6,
            },
        );

        Self { pricing }
    }

    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            pricing: HashMap::new(),
        }
    }

    /// Add or update pricing for a model
    pub fn set_pricing(&mut self, model: String, pricing: ModelPricing) {
        self.pricing.insert(model, pricing);
    }

    /// Find pricing for a model by matching the model name
    ///
    /// Tries exact match, then prefix match (so a versioned id like
    /// `claude-3-5-sonnet-20241022` resolves via `claude-3-5-sonnet`),
    /// then a contains match for provider-prefixed ids.
    pub fn get(&self, model: &str) -> Option<&ModelPricing> {
        if let Some(pricing) = self.pricing.get(model) {
            return Some(pricing);
        }

        for (key, pricing) in &self.pricing {
            if model.starts_with(key.as_str()) {
                return Some(pricing);
            }
        }

        for (key, pricing) in &self.pricing {
            if model.contains(key.as_str()) {
                return Some(pricing);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_for_claude_sonnet() {
        let table = PricingTable::new();
        let pricing = table.get("claude-3-5-sonnet-20241022").unwrap();

        // 1000 input tokens at $3/M = $0.003
        // 500 output tokens at $15/M = $0.0075
        let cost = pricing.cost(1000, 500);
        assert!((cost - 0.0105).abs() < 1e-9);
    }

    #[test]
    fn exact_million_token_costs() {
        let pricing = ModelPricing {
            input_per_million: 3.0,
            output_per_million: 15.0,
        };
        assert_eq!(pricing.cost(1_000_000, 0), 3.0);
        assert_eq!(pricing.cost(0, 1_000_000), 15.0);
    }

    #[test]
    fn unknown_model_has_no_pricing() {
        let table = PricingTable::new();
        assert!(table.get("unknown-model-xyz").is_none());
    }

    #[test]
    fn set_pricing_overrides_builtin() {
        let mut table = PricingTable::new();
        table.set_pricing(
            "gpt-4o".to_string(),
            ModelPricing {
                input_per_million: 1.0,
                output_per_million: 2.0,
            },
        );
        assert_eq!(table.get("gpt-4o").unwrap().input_per_million, 1.0);
    }

    #[test]
    fn contains_match_for_provider_prefixed_ids() {
        let table = PricingTable::new();
        assert!(table.get("anthropic/claude-3-5-haiku").is_some());
    }
}
