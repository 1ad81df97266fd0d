use std::sync::LazyLock;

use regex::Regex;

/// M.2 board lengths, probed in this order; the first one present in the text wins.
pub const FORM_FACTOR_LENGTHS: [u32; 4] = [2230, 2280, 2242, 22110];

static CAPACITY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"([0-9]+)\s*(TB|GB)").ok());

/// Structured retrieval request derived from a normalized title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
	/// Free text for the mandatory relevance clause.
	pub text: String,
	/// Capacity number (unit discarded) for an equality filter.
	pub capacity: Option<u64>,
	/// Board length code for an equality filter.
	pub length: Option<u32>,
}
impl SearchQuery {
	pub fn parse(normalized: &str) -> Self {
		Self {
			text: normalized.to_string(),
			capacity: parse_capacity(normalized),
			length: parse_form_factor_length(normalized),
		}
	}

	pub fn has_filters(&self) -> bool {
		self.capacity.is_some() || self.length.is_some()
	}
}

/// First `<digits><optional whitespace><TB|GB>` in the text. A unit without digits, or digits
/// that overflow, produce no filter.
pub fn parse_capacity(text: &str) -> Option<u64> {
	let re = CAPACITY.as_ref()?;
	let upper = text.to_ascii_uppercase();
	let captures = re.captures(&upper)?;

	captures.get(1)?.as_str().parse().ok()
}

pub fn parse_form_factor_length(text: &str) -> Option<u32> {
	FORM_FACTOR_LENGTHS.into_iter().find(|length| text.contains(&length.to_string()))
}
