use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ResponseFormatError;
use crate::llm::AIMessage;
use crate::products::catalog::Product;
use crate::products::prompt::FILTER_FUNCTION;

/// Optional filters chosen by the model. `None` leaves a dimension unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub product_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

/// A single conjunctive predicate derived from one criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Narrowing<'a> {
    Names(&'a [String]),
    Category(&'a str),
    MaxPrice(f64),
    MinPrice(f64),
    MinRating(f64),
    InStock(bool),
}

impl Narrowing<'_> {
    pub fn keeps(&self, product: &Product) -> bool {
        match *self {
            Narrowing::Names(names) => names.iter().any(|name| *name == product.name),
            Narrowing::Category(category) => {
                product.category.to_lowercase() == category.to_lowercase()
            }
            Narrowing::MaxPrice(max) => product.price <= max,
            Narrowing::MinPrice(min) => product.price >= min,
            Narrowing::MinRating(min) => product.rating >= min,
            Narrowing::InStock(wanted) => product.in_stock == wanted,
        }
    }
}

impl FilterCriteria {
    /// Decodes the `filter_products` call carried by a model reply.
    pub fn from_reply(reply: &AIMessage) -> Result<Self, ResponseFormatError> {
        let call = reply
            .call_named(FILTER_FUNCTION)
            .ok_or(ResponseFormatError::MissingFunctionCall {
                expected: FILTER_FUNCTION,
            })?;

        match &call.args {
            Value::Object(_) => serde_json::from_value(call.args.clone())
                .map_err(|err| ResponseFormatError::InvalidArguments(err.to_string())),
            Value::String(raw) => Err(ResponseFormatError::InvalidArguments(format!(
                "arguments are not valid JSON: {raw}"
            ))),
            other => Err(ResponseFormatError::InvalidArguments(format!(
                "expected an object, got {other}"
            ))),
        }
    }

    /// The active predicates in canonical order. Empty names or category count as unset.
    pub fn narrowings(&self) -> Vec<Narrowing<'_>> {
        let mut steps = Vec::new();
        if let Some(names) = self.product_names.as_deref().filter(|names| !names.is_empty()) {
            steps.push(Narrowing::Names(names));
        }
        if let Some(category) = self.category.as_deref().filter(|category| !category.is_empty()) {
            steps.push(Narrowing::Category(category));
        }
        if let Some(max) = self.max_price {
            steps.push(Narrowing::MaxPrice(max));
        }
        if let Some(min) = self.min_price {
            steps.push(Narrowing::MinPrice(min));
        }
        if let Some(min) = self.min_rating {
            steps.push(Narrowing::MinRating(min));
        }
        if let Some(wanted) = self.in_stock {
            steps.push(Narrowing::InStock(wanted));
        }
        steps
    }

    /// Keeps the products that satisfy every active predicate, in catalog order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        narrow(products, &self.narrowings())
    }
}

/// Applies `steps` one after another, each removing the records it rejects.
pub fn narrow(products: &[Product], steps: &[Narrowing<'_>]) -> Vec<Product> {
    steps.iter().fold(products.to_vec(), |remaining, step| {
        remaining
            .into_iter()
            .filter(|product| step.keeps(product))
            .collect()
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        }),
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("'{text}' is not a number"))),
    }
}
