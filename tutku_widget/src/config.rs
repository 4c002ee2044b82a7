//! Widget configuration read from the loader script tag.

use wasm_bindgen::JsValue;

use crate::{source::ScriptTag, BootError};

make_attr_enum! {
    /// A configuration value the host page can set on the loader tag.
    ConfigKey {
        UserId = ("data-user-id", "userId"),
        ThreadId = ("data-thread-id", "threadId"),
        CompanyId = ("data-company-id", "companyId"),
        AppId = ("data-app-id", "appId"),
        AppName = ("data-app-name", "appName"),
    }
}

/// The set of keys a deployment reads.
///
/// The identity profiles are independent of each other: a conversation
/// deployment never reads `data-app-*` and vice versa.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigProfile {
    /// End user, conversation thread and tenant.
    #[default]
    Conversation,
    /// Application id and display name.
    Application,
    /// No configurable identity; the component gets no properties.
    Anonymous,
}

impl ConfigProfile {
    pub fn keys(self) -> &'static [ConfigKey] {
        match self {
            Self::Conversation => &[ConfigKey::UserId, ConfigKey::ThreadId, ConfigKey::CompanyId],
            Self::Application => &[ConfigKey::AppId, ConfigKey::AppName],
            Self::Anonymous => &[],
        }
    }
}

/// Configuration of one widget instance.
///
/// Every key of the profile is present; a value is `None` when the loader
/// tag did not carry the attribute (or no loader tag was found). Consumers
/// that want the documented default use [`WidgetConfig::value`], which
/// substitutes an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    profile: ConfigProfile,
    values: Vec<(ConfigKey, Option<String>)>,
}

impl WidgetConfig {
    /// A configuration with every value absent.
    pub fn empty(profile: ConfigProfile) -> Self {
        Self::from_lookup(profile, |_| None)
    }

    /// Build a configuration by looking up each profile key by its attribute
    /// name.
    pub fn from_lookup<F>(profile: ConfigProfile, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let values = profile
            .keys()
            .iter()
            .map(|key| (*key, lookup(key.attr_name())))
            .collect();
        Self { profile, values }
    }

    pub fn profile(&self) -> ConfigProfile {
        self.profile
    }

    /// The value of `key`, or `None` if it was not set or is not part of the
    /// profile.
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// The value of `key`, defaulting to `""`.
    pub fn value(&self, key: ConfigKey) -> &str {
        self.get(key).unwrap_or("")
    }

    /// `(property name, value)` pairs in profile order, with defaults applied.
    pub fn props(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values
            .iter()
            .map(|(key, value)| (key.prop_name(), value.as_deref().unwrap_or("")))
    }

    /// Convert to a plain Javascript object: `{ userId: "...", ... }`.
    pub fn to_js_props(&self) -> Result<js_sys::Object, BootError> {
        let obj = js_sys::Object::new();
        for (name, value) in self.props() {
            js_sys::Reflect::set(&obj, &JsValue::from_str(name), &JsValue::from_str(value))?;
        }
        Ok(obj)
    }
}

/// Read the profile's attributes from `source`.
///
/// Without a source every value is absent.
pub fn extract_config<S: ScriptTag>(source: Option<&S>, profile: ConfigProfile) -> WidgetConfig {
    match source {
        Some(script) => WidgetConfig::from_lookup(profile, |name| script.attribute(name)),
        None => WidgetConfig::empty(profile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::FakeScript;

    #[test]
    fn test_extract_present_attributes() {
        let script = FakeScript::new()
            .attr("data-user-id", "u1")
            .attr("data-thread-id", "t1")
            .attr("data-company-id", "c1");

        let config = extract_config(Some(&script), ConfigProfile::Conversation);

        assert_eq!(
            config.props().collect::<Vec<_>>(),
            vec![("userId", "u1"), ("threadId", "t1"), ("companyId", "c1")]
        );
    }

    #[test]
    fn test_extract_keeps_values_verbatim() {
        let script = FakeScript::new().attr("data-user-id", "  Ünïcode <x> ");
        let config = extract_config(Some(&script), ConfigProfile::Conversation);
        assert_eq!(config.get(ConfigKey::UserId), Some("  Ünïcode <x> "));
    }

    #[test]
    fn test_extract_missing_attribute_defaults_to_empty() {
        let script = FakeScript::new().attr("data-user-id", "u1");
        let config = extract_config(Some(&script), ConfigProfile::Conversation);

        assert_eq!(config.get(ConfigKey::ThreadId), None);
        assert_eq!(config.value(ConfigKey::ThreadId), "");
        assert_eq!(config.value(ConfigKey::CompanyId), "");
        assert_eq!(config.value(ConfigKey::UserId), "u1");
    }

    #[test]
    fn test_extract_without_source() {
        let config = extract_config(None::<&FakeScript>, ConfigProfile::Conversation);
        assert_eq!(config, WidgetConfig::empty(ConfigProfile::Conversation));
        assert!(config.props().all(|(_, value)| value.is_empty()));
        assert_eq!(config.props().count(), 3);
    }

    #[test]
    fn test_profiles_do_not_mix() {
        let script = FakeScript::new()
            .attr("data-user-id", "u1")
            .attr("data-app-id", "a1")
            .attr("data-app-name", "Support");

        let app = extract_config(Some(&script), ConfigProfile::Application);
        assert_eq!(
            app.props().collect::<Vec<_>>(),
            vec![("appId", "a1"), ("appName", "Support")]
        );
        assert_eq!(app.get(ConfigKey::UserId), None);

        let anon = extract_config(Some(&script), ConfigProfile::Anonymous);
        assert_eq!(anon.props().count(), 0);
    }

    #[test]
    fn test_config_key_names() {
        assert_eq!(ConfigKey::ALL.len(), 5);
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_attr_name(key.attr_name()), Some(*key));
            assert!(key.attr_name().starts_with("data-"));
        }
        assert_eq!(ConfigKey::from_attr_name("data-other"), None);
        assert_eq!(ConfigKey::CompanyId.prop_name(), "companyId");
    }
}
