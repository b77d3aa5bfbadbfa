//! Stylesheet evaluation for the simulated engine.
//!
//! Only the subset of CSS the isolated test environment needs: style rules
//! with compound selectors joined by descendant or child combinators, at-rule
//! blocks, and `&` nesting. Whatever the profile does not understand is
//! dropped the way a real engine drops invalid rules.

use super::profile::EngineProfile;

/// One compiled style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Rule {
	pub selectors: Vec<Complex>,
	pub decls: Vec<(String, String)>,
}

/// A complex selector stored right-to-left: `subject` plus its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Complex {
	pub subject: Compound,
	pub ancestors: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Combinator {
	Descendant,
	Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Compound {
	pub tag: Option<String>,
	pub classes: Vec<String>,
	pub ids: Vec<String>,
	/// Attribute selectors and pseudo-elements never match a probe element.
	pub unmatchable: bool,
}

/// The element view matching runs against.
pub(super) trait Element: Sized {
	fn tag(&self) -> &str;
	fn has_class(&self, class: &str) -> bool;
	fn id(&self) -> Option<&str>;
	fn parent(&self) -> Option<Self>;
}

impl Compound {
	fn matches<E: Element>(&self, el: &E) -> bool {
		if self.unmatchable {
			return false;
		}
		if self.tag.as_ref().is_some_and(|tag| !tag.eq_ignore_ascii_case(el.tag())) {
			return false;
		}
		self.classes.iter().all(|c| el.has_class(c)) && self.ids.iter().all(|i| el.id() == Some(i))
	}
}

impl Complex {
	pub fn matches<E: Element>(&self, el: &E) -> bool {
		self.subject.matches(el) && match_ancestors(&self.ancestors, el)
	}
}

fn match_ancestors<E: Element>(rest: &[(Combinator, Compound)], el: &E) -> bool {
	let Some(((comb, compound), tail)) = rest.split_first() else {
		return true;
	};
	match comb {
		Combinator::Child => el
			.parent()
			.is_some_and(|p| compound.matches(&p) && match_ancestors(tail, &p)),
		Combinator::Descendant => {
			let mut cur = el.parent();
			while let Some(p) = cur {
				if compound.matches(&p) && match_ancestors(tail, &p) {
					return true;
				}
				cur = p.parent();
			}
			false
		}
	}
}

/// Compiles `css` into the rules `profile` honors.
pub(super) fn parse(css: &str, profile: &EngineProfile) -> Vec<Rule> {
	let mut rules = Vec::new();
	parse_rule_list(&strip_comments(css), profile, &mut rules);
	rules
}

fn strip_comments(css: &str) -> String {
	let mut out = String::with_capacity(css.len());
	let mut rest = css;
	while let Some(start) = rest.find("/*") {
		out.push_str(&rest[..start]);
		match rest[start + 2..].find("*/") {
			Some(end) => rest = &rest[start + 2 + end + 2..],
			None => return out,
		}
	}
	out.push_str(rest);
	out
}

/// Index of the `}` closing the block whose `{` sits at `open`.
fn matching_brace(s: &str, open: usize) -> Option<usize> {
	let mut depth = 0usize;
	for (i, c) in s[open..].char_indices() {
		match c {
			'{' => depth += 1,
			'}' => {
				depth -= 1;
				if depth == 0 {
					return Some(open + i);
				}
			}
			_ => {}
		}
	}
	None
}

fn parse_rule_list(css: &str, profile: &EngineProfile, out: &mut Vec<Rule>) {
	let mut rest = css.trim_start();
	while !rest.is_empty() {
		let Some(open) = rest.find(['{', ';']) else {
			return;
		};
		let prelude = rest[..open].trim();
		if rest.as_bytes()[open] == b';' {
			rest = rest[open + 1..].trim_start();
			continue;
		}
		let Some(close) = matching_brace(rest, open) else {
			return;
		};
		let body = &rest[open + 1..close];
		if let Some(at) = prelude.strip_prefix('@') {
			let name = at.split(|c: char| c.is_whitespace() || c == '(').next().unwrap_or_default();
			if profile.at_rules.contains(name) {
				parse_rule_list(body, profile, out);
			}
		} else {
			parse_style_rule(prelude, body, profile, out);
		}
		rest = rest[close + 1..].trim_start();
	}
}

fn parse_style_rule(prelude: &str, body: &str, profile: &EngineProfile, out: &mut Vec<Rule>) {
	let Some(selectors) = compile_selector_list(prelude, profile) else {
		return;
	};
	let mut decls = Vec::new();
	let mut nested = Vec::new();
	let mut rest = body;
	loop {
		let trimmed = rest.trim_start();
		if trimmed.is_empty() {
			break;
		}
		match trimmed.find(['{', ';']) {
			Some(i) if trimmed.as_bytes()[i] == b'{' => {
				let Some(close) = matching_brace(trimmed, i) else {
					break;
				};
				nested.push((trimmed[..i].trim(), &trimmed[i + 1..close]));
				rest = &trimmed[close + 1..];
			}
			Some(i) => {
				push_decl(&trimmed[..i], profile, &mut decls);
				rest = &trimmed[i + 1..];
			}
			None => {
				push_decl(trimmed, profile, &mut decls);
				break;
			}
		}
	}
	if !decls.is_empty() {
		out.push(Rule { selectors, decls });
	}
	if !profile.nesting {
		return;
	}
	for (inner_prelude, inner_body) in nested {
		if let Some(at) = inner_prelude.strip_prefix('@') {
			let name = at.split(|c: char| c.is_whitespace() || c == '(').next().unwrap_or_default();
			if profile.at_rules.contains(name) {
				parse_style_rule(prelude, inner_body, profile, out);
			}
			continue;
		}
		let resolved = resolve_nested(prelude, inner_prelude);
		parse_style_rule(&resolved, inner_body, profile, out);
	}
}

/// Expands `&` in a nested selector list against every parent selector.
fn resolve_nested(parent: &str, nested: &str) -> String {
	let parents = split_top_level(parent, ',');
	let mut resolved = Vec::new();
	for child in split_top_level(nested, ',') {
		for p in &parents {
			let p = p.trim();
			if child.contains('&') {
				resolved.push(child.trim().replace('&', p));
			} else {
				resolved.push(format!("{p} {}", child.trim()));
			}
		}
	}
	resolved.join(", ")
}

fn push_decl(raw: &str, profile: &EngineProfile, decls: &mut Vec<(String, String)>) {
	let Some((prop, value)) = raw.split_once(':') else {
		return;
	};
	let prop = prop.trim().to_ascii_lowercase();
	let value = value.trim().trim_end_matches("!important").trim();
	if prop.is_empty() || value.is_empty() {
		return;
	}
	if declaration_supported(profile, &prop, value) {
		decls.push((prop, value.to_string()));
	}
}

/// Whether `prop: value` is a declaration the engine keeps.
pub(super) fn declaration_supported(profile: &EngineProfile, prop: &str, value: &str) -> bool {
	let condition = normalize_condition(&format!("{prop}: {value}"));
	if profile.supports.iter().any(|c| normalize_condition(c) == condition) {
		return true;
	}
	profile.defaults.contains_key(prop)
		&& functions_in(value).all(|f| profile.functions.contains(&f.to_ascii_lowercase()))
}

/// Function names used in a value, e.g. `calc` and `var` in `calc(var(--x) * 2)`.
fn functions_in(value: &str) -> impl Iterator<Item = &str> {
	value.match_indices('(').filter_map(move |(i, _)| {
		let head = &value[..i];
		let start = head
			.rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
			.map_or(0, |p| p + 1);
		let name = &head[start..];
		(!name.is_empty()).then_some(name)
	})
}

/// Canonical spelling of a feature-query condition for comparison.
pub(super) fn normalize_condition(condition: &str) -> String {
	let collapsed = condition.split_whitespace().collect::<Vec<_>>().join(" ");
	let mut out = String::with_capacity(collapsed.len());
	let chars: Vec<char> = collapsed.chars().collect();
	for (i, &c) in chars.iter().enumerate() {
		if c == ' ' {
			let prev = i.checked_sub(1).map(|p| chars[p]);
			let next = chars.get(i + 1).copied();
			let tight = |ch: Option<char>| matches!(ch, Some('(' | ')' | ',' | ':'));
			if tight(prev) || tight(next) {
				continue;
			}
		}
		out.push(c.to_ascii_lowercase());
	}
	out
}

fn split_top_level(s: &str, sep: char) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth = 0i32;
	let mut start = 0;
	for (i, c) in s.char_indices() {
		match c {
			'(' | '[' => depth += 1,
			')' | ']' => depth -= 1,
			c if c == sep && depth == 0 => {
				parts.push(&s[start..i]);
				start = i + c.len_utf8();
			}
			_ => {}
		}
	}
	parts.push(&s[start..]);
	parts
}

/// Whether every pseudo-class used anywhere in `selector` is supported.
pub(super) fn selector_supported(selector: &str, profile: &EngineProfile) -> bool {
	let bytes = selector.as_bytes();
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] != b':' {
			i += 1;
			continue;
		}
		if bytes.get(i + 1) == Some(&b':') {
			// Pseudo-elements are validated by name only when the profile lists them.
			let end = ident_end(selector, i + 2);
			if !profile.selectors.contains(&selector[i..end]) {
				return false;
			}
			i = end;
			continue;
		}
		let end = ident_end(selector, i + 1);
		if end == i + 1 || !profile.selectors.contains(&selector[i..end].to_ascii_lowercase()) {
			return false;
		}
		i = end;
	}
	true
}

fn ident_end(s: &str, from: usize) -> usize {
	s[from..]
		.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
		.map_or(s.len(), |p| from + p)
}

fn compile_selector_list(prelude: &str, profile: &EngineProfile) -> Option<Vec<Complex>> {
	if prelude.is_empty() || !selector_supported(prelude, profile) {
		return None;
	}
	split_top_level(prelude, ',')
		.into_iter()
		.map(|s| compile_complex(s.trim()))
		.collect()
}

fn compile_complex(selector: &str) -> Option<Complex> {
	let mut compounds = Vec::new();
	let mut combinators = Vec::new();
	let mut pending = None;
	for token in tokenize_complex(selector) {
		match token {
			">" => pending = Some(Combinator::Child),
			"+" | "~" => return None,
			compound => {
				if !compounds.is_empty() {
					combinators.push(pending.take().unwrap_or(Combinator::Descendant));
				}
				compounds.push(compile_compound(compound)?);
			}
		}
	}
	let subject = compounds.pop()?;
	let ancestors = combinators.into_iter().rev().zip(compounds.into_iter().rev()).collect();
	Some(Complex { subject, ancestors })
}

/// Splits a complex selector into compounds and combinators, keeping
/// parenthesized arguments intact.
fn tokenize_complex(selector: &str) -> Vec<&str> {
	let mut tokens = Vec::new();
	let mut depth = 0i32;
	let mut start: Option<usize> = None;
	for (i, c) in selector.char_indices() {
		match c {
			'(' | '[' => {
				depth += 1;
				start.get_or_insert(i);
			}
			')' | ']' => depth -= 1,
			c if depth == 0 && (c.is_whitespace() || matches!(c, '>' | '+' | '~')) => {
				if let Some(s) = start.take() {
					tokens.push(&selector[s..i]);
				}
				if !c.is_whitespace() {
					tokens.push(&selector[i..i + 1]);
				}
			}
			_ => {
				start.get_or_insert(i);
			}
		}
	}
	if let Some(s) = start {
		tokens.push(&selector[s..]);
	}
	tokens
}

fn compile_compound(src: &str) -> Option<Compound> {
	let mut compound = Compound::default();
	let bytes = src.as_bytes();
	let mut i = 0;
	while i < bytes.len() {
		match bytes[i] {
			b'*' => i += 1,
			b'.' => {
				let end = ident_end(src, i + 1);
				compound.classes.push(src[i + 1..end].to_string());
				i = end;
			}
			b'#' => {
				let end = ident_end(src, i + 1);
				compound.ids.push(src[i + 1..end].to_string());
				i = end;
			}
			b'[' => {
				compound.unmatchable = true;
				i += src[i..].find(']').map_or(src.len() - i, |p| p + 1);
			}
			b':' => {
				let element = bytes.get(i + 1) == Some(&b':');
				let name_start = if element { i + 2 } else { i + 1 };
				let mut end = ident_end(src, name_start);
				if bytes.get(end) == Some(&b'(') {
					end = skip_parens(src, end)?;
				}
				compound.unmatchable |= element;
				i = end;
			}
			_ => {
				let end = ident_end(src, i);
				if end == i {
					return None;
				}
				compound.tag = Some(src[i..end].to_ascii_lowercase());
				i = end;
			}
		}
	}
	Some(compound)
}

fn skip_parens(s: &str, open: usize) -> Option<usize> {
	let mut depth = 0i32;
	for (i, c) in s[open..].char_indices() {
		match c {
			'(' => depth += 1,
			')' => {
				depth -= 1;
				if depth == 0 {
					return Some(open + i + 1);
				}
			}
			_ => {}
		}
	}
	None
}
