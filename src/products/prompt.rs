use crate::llm::{ChatMessage, ToolDefinition, ToolFunction, ToolParam, ToolParamType};
use crate::products::catalog::{Catalog, MAX_RATING};

pub const FILTER_FUNCTION: &str = "filter_products";
pub const CATEGORIES: [&str; 5] = ["Electronics", "Fitness", "Kitchen", "Books", "Clothing"];

const SEARCH_GUIDANCE: &str = r#"Based on the user's natural language query, call the filter_products function with appropriate parameters to find matching products. You have two main approaches:

**Approach 1: Use specific product names (PREFERRED for specific requests)**
When users ask for specific types of products (like "novels", "laptops", "headphones"), analyze the product dataset and directly specify the exact product names that match their criteria using the product_names parameter.

For example:
- "novel books" -> product_names: ["Novel", "Science Novel", "Fiction Novel"]
- "laptops" -> product_names: ["Laptop for Gaming"]
- "headphones" -> product_names: ["Wireless Headphones", "Noise-Cancelling Headphones"]

**IMPORTANT: When using product_names, be smart about additional filters:**
- If user asks for "great novels" or "novels with high reviews", first check the actual ratings of the novels in the dataset
- Set min_rating to a realistic threshold that will actually return results
- For example, if novels have ratings 4.1-4.3, set min_rating to 4.0 or 4.1, NOT 4.5
- If the user wants the "best" or "highest rated" of a specific product type, you can either:
  1. Use product_names with only the highest-rated items of that type, OR
  2. Use product_names with all items of that type + reasonable min_rating

**Approach 2: Use general filters**
For broader searches, use the general filter parameters:
- Words like "cheap", "affordable", "budget" suggest lower max_price
- Words like "premium", "high-quality", "expensive" suggest higher min_price
- Words like "highly rated", "best", "top-rated" suggest higher min_rating
- Words like "available", "in stock" suggest in_stock=true
- Specific categories should map to the category parameter
- Price mentions like "under $100", "less than $50" should set max_price
- Rating mentions like "4+ stars", "highly rated" should set min_rating

**Combining approaches:**
You can combine product_names with other filters (like min_rating, max_price, in_stock) to further refine the results, but make sure the combination will actually return products!

Always prioritize the user's specific intent and ensure your filters will return relevant results."#;

/// System message embedding the whole catalog and the filtering guidance.
pub fn system_message(catalog: &Catalog) -> String {
    let price_range = match catalog.price_range() {
        Some((low, high)) => format!("${low:.2} - ${high:.2}"),
        None => "no products available".to_string(),
    };
    let products =
        serde_json::to_string_pretty(catalog.products()).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a product search assistant. You have access to a dataset of {count} products across these categories: {categories}.\n\n\
         Price range: {price_range}\n\
         Rating range: 0.0 - {MAX_RATING:.1}\n\n\
         Available products:\n{products}\n\n\
         {SEARCH_GUIDANCE}",
        count = catalog.len(),
        categories = catalog.categories().join(", "),
    )
}

pub fn messages(catalog: &Catalog, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_message(catalog)),
        ChatMessage::user(query),
    ]
}

/// Schema of the single function the model must call.
pub fn filter_tool() -> ToolDefinition {
    ToolDefinition::from_function(
        ToolFunction::new(
            FILTER_FUNCTION,
            "Filter products based on user preferences and criteria. You can either use general filters (category, price, rating, stock) OR specify exact product names that match the user's criteria.",
        )
        .with_param(
            ToolParam::optional(
                "product_names",
                ToolParamType::Array,
                "List of specific product names that match the user's criteria. Use this when you want to return specific products that match the user's request (e.g., when they ask for 'novels', specify the exact novel names from the dataset).",
            )
            .of(ToolParamType::String),
        )
        .with_param(
            ToolParam::optional(
                "category",
                ToolParamType::String,
                "Product category (Electronics, Fitness, Kitchen, Books, Clothing)",
            )
            .one_of(CATEGORIES),
        )
        .with_param(ToolParam::optional(
            "max_price",
            ToolParamType::Number,
            "Maximum price for products",
        ))
        .with_param(ToolParam::optional(
            "min_price",
            ToolParamType::Number,
            "Minimum price for products",
        ))
        .with_param(ToolParam::optional(
            "min_rating",
            ToolParamType::Number,
            "Minimum rating for products (0.0 to 5.0)",
        ))
        .with_param(ToolParam::optional(
            "in_stock",
            ToolParamType::Boolean,
            "Whether products should be in stock",
        )),
    )
}
