use serde::{Deserialize, Serialize};

const UNKNOWN_SIZE: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// A catalogued drive. `id` is assigned by the source catalog and never rewritten; every other
/// field is replaced wholesale on re-sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
	#[serde(rename = "driveId")]
	pub id: String,
	pub url: String,
	#[serde(rename = "mfgr")]
	pub manufacturer: String,
	pub name: String,
	pub capacity: String,
	pub form_factor: String,
	pub interface: String,
	pub protocol: String,
	pub dram: String,
	pub hmb: String,
	pub released: String,
	pub endurance: String,
	pub warranty: String,
	pub seq_read: String,
	pub seq_write: String,
	pub controller: Controller,
	pub flash: Flash,
}
impl Product {
	pub fn numeric_id(&self) -> Option<u64> {
		self.id.trim().parse().ok()
	}

	pub fn dram_size(&self) -> &str {
		display_size(&self.dram)
	}

	pub fn hmb_size(&self) -> &str {
		display_size(&self.hmb)
	}

	pub fn summary(&self) -> ProductSummary {
		ProductSummary {
			id: self.id.clone(),
			manufacturer: self.manufacturer.clone(),
			name: self.name.clone(),
			capacity: self.capacity.clone(),
			form_factor: self.form_factor.clone(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Controller {
	#[serde(rename = "mfgr")]
	pub manufacturer: String,
	pub name: String,
	pub name_short: String,
	pub channels: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flash {
	#[serde(rename = "mfgr")]
	pub manufacturer: String,
	pub name: String,
	#[serde(rename = "type")]
	pub r#type: String,
	pub layers: String,
}

/// Lightweight projection used by lookups that do not need the full record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductSummary {
	#[serde(rename = "driveId")]
	pub id: String,
	#[serde(rename = "mfgr")]
	pub manufacturer: String,
	pub name: String,
	pub capacity: String,
	pub form_factor: String,
}

fn display_size(raw: &str) -> &str {
	if raw == UNKNOWN_SIZE { NOT_AVAILABLE } else { raw }
}
