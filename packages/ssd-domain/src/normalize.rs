use std::sync::LazyLock;

use regex::Regex;

/// Interface and format tokens that carry no identifying signal. Removed as raw substrings, so a
/// model number that happens to contain one of them is clipped as well.
pub const NOISE_TOKENS: [&str; 6] = ["ssd", "m2", "m.2", "nvme", "pcie", "gen"];

/// Abbreviation marker and the long brand form appended when the marker is present.
pub const BRAND_ALIASES: [(&str, &str); 1] = [(" wd", " western digital")];

static TAG_GROUP: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[[^\]]+\]").ok());

/// Turns a posting title into the lowercase text used for retrieval and sanity checks.
///
/// The result may be empty or match nothing; callers treat that as "no candidate".
pub fn normalize_title(raw: &str) -> String {
	let lowered = raw.to_ascii_lowercase();
	let mut text = strip_tag_groups(&lowered);

	for token in NOISE_TOKENS {
		text = text.replace(token, "");
	}
	for (marker, expansion) in BRAND_ALIASES {
		if text.contains(marker) {
			text.push_str(expansion);
		}
	}

	text
}

fn strip_tag_groups(text: &str) -> String {
	match TAG_GROUP.as_ref() {
		Some(re) => re.replace_all(text, "").into_owned(),
		None => text.to_string(),
	}
}
