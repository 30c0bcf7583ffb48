/// Writing systems the pre-filter can discriminate.
///
/// Coarse Unicode-block classification, not a full script database; it
/// only needs to be precise enough to rule languages out cheaply before
/// distance scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Script {
	Latin,
	Cyrillic,
	Greek,
	Han,
	Hiragana,
	Katakana,
	Hangul,
}

impl Script {
	/// Classifies a single character, `None` for anything that is not an
	/// alphabetic character of a known block.
	pub fn of(c: char) -> Option<Script> {
		if !c.is_alphabetic() {
			return None;
		}
		match c {
			'\u{0041}'..='\u{007A}' | '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}' => {
				Some(Script::Latin)
			}
			'\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Some(Script::Greek),
			'\u{0400}'..='\u{052F}' => Some(Script::Cyrillic),
			'\u{3040}'..='\u{309F}' => Some(Script::Hiragana),
			'\u{30A0}'..='\u{30FF}' => Some(Script::Katakana),
			'\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' => Some(Script::Han),
			'\u{1100}'..='\u{11FF}' | '\u{AC00}'..='\u{D7AF}' => Some(Script::Hangul),
			_ => None,
		}
	}

	/// The most frequent known script of a text.
	///
	/// Returns `None` when no character belongs to a known script; count
	/// ties are broken by the enum order so the answer is deterministic.
	pub fn dominant(text: &str) -> Option<Script> {
		let mut counts: Vec<(Script, usize)> = Vec::new();
		for c in text.chars() {
			if let Some(script) = Script::of(c) {
				match counts.iter_mut().find(|(seen, _)| *seen == script) {
					Some((_, count)) => *count += 1,
					None => counts.push((script, 1)),
				}
			}
		}
		counts
			.into_iter()
			.max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
			.map(|(script, _)| script)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_single_characters() {
		assert_eq!(Script::of('a'), Some(Script::Latin));
		assert_eq!(Script::of('é'), Some(Script::Latin));
		assert_eq!(Script::of('ж'), Some(Script::Cyrillic));
		assert_eq!(Script::of('λ'), Some(Script::Greek));
		assert_eq!(Script::of('語'), Some(Script::Han));
		assert_eq!(Script::of('あ'), Some(Script::Hiragana));
		assert_eq!(Script::of('カ'), Some(Script::Katakana));
		assert_eq!(Script::of('한'), Some(Script::Hangul));
		assert_eq!(Script::of('7'), None);
		assert_eq!(Script::of('!'), None);
	}

	#[test]
	fn dominant_script_follows_the_majority() {
		assert_eq!(Script::dominant("добрый вечер"), Some(Script::Cyrillic));
		assert_eq!(Script::dominant("good evening"), Some(Script::Latin));
		// Kana outweighs the kanji in ordinary Japanese prose.
		assert_eq!(Script::dominant("これは日本語のぶんです"), Some(Script::Hiragana));
	}

	#[test]
	fn dominant_script_of_symbols_is_none() {
		assert_eq!(Script::dominant("123 + 456"), None);
		assert_eq!(Script::dominant(""), None);
	}
}
