use tracing::{error, info, warn};

use crate::llm::{AskOptions, OpenAiClient};
use crate::products::catalog::{Catalog, Product};
use crate::products::criteria::FilterCriteria;
use crate::products::prompt;

/// Natural-language search over a loaded catalog.
#[derive(Debug, Clone)]
pub struct ProductSearch {
    catalog: Catalog,
    client: OpenAiClient,
}

impl ProductSearch {
    pub fn new(catalog: Catalog, client: OpenAiClient) -> Self {
        Self { catalog, client }
    }

    /// Asks the model for filter criteria and applies them.
    ///
    /// Transport failures and replies without a usable `filter_products`
    /// call both degrade to an empty result.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        let messages = prompt::messages(&self.catalog, query);
        let tool = prompt::filter_tool();

        let reply = match self
            .client
            .call_function(&messages, &tool, AskOptions::default())
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                error!("Error calling inference API: {err}");
                return Vec::new();
            }
        };

        let criteria = match FilterCriteria::from_reply(&reply) {
            Ok(criteria) => criteria,
            Err(err) => {
                warn!("{err}");
                return Vec::new();
            }
        };

        info!(
            filters = %serde_json::to_string(&criteria).unwrap_or_default(),
            "model determined filters"
        );
        criteria.apply(self.catalog.products())
    }
}
