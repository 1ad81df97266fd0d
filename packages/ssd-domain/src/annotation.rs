use url::form_urlencoded;

use crate::Product;

const CATALOG_HOME: &str = "https://www.techpowerup.com/ssd-specs";
const PROJECT_HOME: &str = "https://github.com/hack-ink/ssd-bot";
const PRICE_HISTORY_SEARCH: &str = "https://camelcamelcamel.com/search?sq=";

/// Markdown comment body describing a matched product.
pub fn render(product: &Product) -> String {
	let query = query_escape(&format!("{} {}", product.manufacturer, product.name));
	let footer = format!(
		"[^(TechPowerUp Database)]({CATALOG_HOME}) ^| [^( Github)]({PROJECT_HOME}) ^| [^(Issues)]({PROJECT_HOME}/issues)"
	);
	let sections = [
		format!(
			"The {} {} {} is a *{}* SSD.",
			product.manufacturer, product.name, product.capacity, product.flash.r#type
		),
		format!("* Interface: **{}**", product.interface),
		format!("* Form Factor: **{}**", product.form_factor),
		format!(
			"* Controller: **{} {}**",
			product.controller.manufacturer, product.controller.name
		),
		format!("* DRAM: **{}**", product.dram_size()),
		format!("* HMB: **{}**", product.hmb_size()),
		format!("* NAND Brand: **{}**", product.flash.manufacturer),
		format!("* NAND Type: **{}**", product.flash.r#type),
		format!("* R/W: **{} - {}**", product.seq_read, product.seq_write),
		format!("* Endurance: **{}**", product.endurance),
		format!("* Price History: **[camelcamelcamel]({PRICE_HISTORY_SEARCH}{query})**"),
		format!("* Detailed Link: **[TechPowerUp SSD Database]({})**", product.url),
		format!("* Variations: **[TechPowerUp SSD]({CATALOG_HOME}/#{query})**"),
		format!("---\n{footer}"),
	];

	sections.join("\n\n")
}

fn query_escape(text: &str) -> String {
	form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
