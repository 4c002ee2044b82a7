//! Locating the script tag that loaded the widget.

use std::borrow::Cow;

use crate::config::ConfigKey;

/// Substring of the bundle file name, used to recognize the loader tag by
/// its `src`.
pub const BUNDLE_FRAGMENT: &str = "tutku-chatbot-widget";

/// The parts of a script element the bootstrapper looks at.
pub trait ScriptTag {
    fn attribute(&self, name: &str) -> Option<String>;
    fn src(&self) -> Option<String>;
}

impl ScriptTag for web_sys::HtmlScriptElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn src(&self) -> Option<String> {
        self.get_attribute("src")
    }
}

impl<T: ScriptTag + ?Sized> ScriptTag for &T {
    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }

    fn src(&self) -> Option<String> {
        (**self).src()
    }
}

/// Decides whether a script element belongs to the widget.
///
/// A tag matches if it carries any of the marker attributes, or if its
/// `src` contains the bundle fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerRule {
    keys: Vec<ConfigKey>,
    bundle_fragment: Cow<'static, str>,
}

impl Default for MarkerRule {
    fn default() -> Self {
        Self {
            keys: ConfigKey::ALL.to_vec(),
            bundle_fragment: Cow::Borrowed(BUNDLE_FRAGMENT),
        }
    }
}

impl MarkerRule {
    pub fn with_keys(mut self, keys: impl Into<Vec<ConfigKey>>) -> Self {
        self.keys = keys.into();
        self
    }

    pub fn with_bundle_fragment(mut self, fragment: impl Into<Cow<'static, str>>) -> Self {
        self.bundle_fragment = fragment.into();
        self
    }

    pub fn matches<S: ScriptTag>(&self, script: &S) -> bool {
        if self
            .keys
            .iter()
            .any(|key| script.attribute(key.attr_name()).is_some())
        {
            return true;
        }
        if self.bundle_fragment.is_empty() {
            return false;
        }
        script
            .src()
            .map(|src| src.contains(self.bundle_fragment.as_ref()))
            .unwrap_or(false)
    }
}

/// How the loader tag is found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceStrategy {
    /// Trust `document.currentScript`.
    /// Only correct when the bundle is executed synchronously.
    CurrentScript,
    /// Scan all script elements, newest first.
    Scan,
    /// Use `document.currentScript` if it matches the marker rule, otherwise
    /// scan.
    #[default]
    CurrentScriptThenScan,
}

impl SourceStrategy {
    pub fn uses_current_script(self) -> bool {
        !matches!(self, Self::Scan)
    }
}

/// Return the last script in document order that matches `rule`.
///
/// The most recently inserted tag wins when the loader is included more
/// than once.
pub fn find_marked<I>(scripts: I, rule: &MarkerRule) -> Option<I::Item>
where
    I: IntoIterator,
    I::IntoIter: DoubleEndedIterator,
    I::Item: ScriptTag,
{
    scripts.into_iter().rev().find(|script| rule.matches(script))
}

/// Apply `strategy` to a captured current script and a lazy scan.
pub fn resolve_source<S, F>(
    strategy: SourceStrategy,
    current: Option<S>,
    rule: &MarkerRule,
    scan: F,
) -> Option<S>
where
    S: ScriptTag,
    F: FnOnce() -> Option<S>,
{
    match strategy {
        SourceStrategy::CurrentScript => current,
        SourceStrategy::Scan => scan(),
        SourceStrategy::CurrentScriptThenScan => match current {
            Some(script) if rule.matches(&script) => Some(script),
            _ => scan(),
        },
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::ScriptTag;

    #[derive(Clone, Debug, Default)]
    pub struct FakeScript {
        pub name: &'static str,
        attrs: HashMap<String, String>,
    }

    impl FakeScript {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn named(name: &'static str) -> Self {
            Self {
                name,
                ..Self::default()
            }
        }

        pub fn attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.insert(name.to_string(), value.to_string());
            self
        }

        pub fn with_src(self, value: &str) -> Self {
            self.attr("src", value)
        }
    }

    impl ScriptTag for FakeScript {
        fn attribute(&self, name: &str) -> Option<String> {
            self.attrs.get(name).cloned()
        }

        fn src(&self) -> Option<String> {
            self.attrs.get("src").cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::FakeScript, *};

    #[test]
    fn test_marker_attribute_matches() {
        let rule = MarkerRule::default();
        assert!(rule.matches(&FakeScript::new().attr("data-thread-id", "t1")));
        assert!(rule.matches(&FakeScript::new().attr("data-app-name", "")));
    }

    #[test]
    fn test_marker_src_matches() {
        let rule = MarkerRule::default();
        let script =
            FakeScript::new().with_src("https://cdn.example.com/v2/tutku-chatbot-widget.iife.js");
        assert!(rule.matches(&script));
    }

    #[test]
    fn test_unrelated_script_does_not_match() {
        let rule = MarkerRule::default();
        assert!(!rule.matches(&FakeScript::new()));
        let unrelated = FakeScript::new()
            .with_src("/static/analytics.js")
            .attr("data-foo", "x");
        assert!(!rule.matches(&unrelated));
    }

    #[test]
    fn test_empty_fragment_never_matches_src() {
        let rule = MarkerRule::default().with_bundle_fragment("");
        assert!(!rule.matches(&FakeScript::new().with_src("/anything.js")));
    }

    #[test]
    fn test_custom_marker_keys() {
        let rule = MarkerRule::default().with_keys(vec![ConfigKey::AppId]);
        assert!(!rule.matches(&FakeScript::new().attr("data-user-id", "u1")));
        assert!(rule.matches(&FakeScript::new().attr("data-app-id", "a1")));
    }

    #[test]
    fn test_find_marked_prefers_last() {
        let scripts = vec![
            FakeScript::named("first").attr("data-user-id", "u1"),
            FakeScript::named("vendor").with_src("/vendor.js"),
            FakeScript::named("second").with_src("/tutku-chatbot-widget.js"),
            FakeScript::named("trailing").with_src("/app.js"),
        ];
        let found = find_marked(&scripts, &MarkerRule::default()).unwrap();
        assert_eq!(found.name, "second");
    }

    #[test]
    fn test_find_marked_none() {
        let scripts = vec![FakeScript::new().with_src("/app.js"), FakeScript::new()];
        assert!(find_marked(&scripts, &MarkerRule::default()).is_none());
        assert!(find_marked(Vec::<FakeScript>::new(), &MarkerRule::default()).is_none());
    }

    #[test]
    fn test_resolve_current_script_is_trusted() {
        let rule = MarkerRule::default();
        let current = FakeScript::named("current");
        let found = resolve_source(
            SourceStrategy::CurrentScript,
            Some(current),
            &rule,
            || panic!("must not scan"),
        );
        assert_eq!(found.unwrap().name, "current");
    }

    #[test]
    fn test_resolve_fast_path_requires_marker() {
        let rule = MarkerRule::default();

        let marked = FakeScript::named("current").attr("data-user-id", "u1");
        let found = resolve_source(
            SourceStrategy::CurrentScriptThenScan,
            Some(marked),
            &rule,
            || panic!("must not scan"),
        );
        assert_eq!(found.unwrap().name, "current");

        let unmarked = FakeScript::named("current");
        let found = resolve_source(
            SourceStrategy::CurrentScriptThenScan,
            Some(unmarked),
            &rule,
            || Some(FakeScript::named("scanned")),
        );
        assert_eq!(found.unwrap().name, "scanned");

        let found = resolve_source(SourceStrategy::CurrentScriptThenScan, None, &rule, || {
            Some(FakeScript::named("scanned"))
        });
        assert_eq!(found.unwrap().name, "scanned");
    }

    #[test]
    fn test_resolve_scan_ignores_current() {
        let rule = MarkerRule::default();
        let current = FakeScript::named("current").attr("data-user-id", "u1");
        let found = resolve_source(SourceStrategy::Scan, Some(current), &rule, || None);
        assert!(found.is_none());
        assert!(!SourceStrategy::Scan.uses_current_script());
        assert!(SourceStrategy::default().uses_current_script());
    }
}
