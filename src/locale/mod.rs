//! Locale definitions and the process-wide locale registry
//!
//! A [`Locale`] is an immutable set of month/weekday names, the first day of
//! the week and the localized long-date templates. Every operation that needs
//! one has a variant taking `&Locale` explicitly; the variants without it read
//! the active locale of the global [`LocaleRegistry`].
//!
//! The registry is guarded by an `RwLock`, so switching the active locale
//! from one thread while another formats is safe. The switch is still global:
//! code that needs a stable locale should pass it explicitly.

pub mod presets;

use crate::constants::{
    DAYS_PER_WEEK, DEFAULT_LOCALE, LOG_LOCALE_ACTIVATED, LOG_LOCALE_REGISTERED, LOG_LOCALE_UNKNOWN, MONTHS_PER_YEAR,
};
use crate::error::{DateTimeError, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Ordinal suffix rules used by the `Do` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordinal {
    /// 1st, 2nd, 3rd, 4th, 11th
    #[default]
    English,
    /// 1., 2., 3.
    Period,
    /// 1er, 2, 3
    French,
    /// 1º, 2º, 3º
    Masculine,
}

impl Ordinal {
    pub fn apply(self, n: u32) -> String {
        match self {
            Ordinal::English => {
                let suffix = match (n % 10, n % 100) {
                    (_, 11..=13) => "th",
                    (1, _) => "st",
                    (2, _) => "nd",
                    (3, _) => "rd",
                    _ => "th",
                };
                format!("{}{}", n, suffix)
            }
            Ordinal::Period => format!("{}.", n),
            Ordinal::French => {
                if n == 1 {
                    "1er".to_string()
                } else {
                    n.to_string()
                }
            }
            Ordinal::Masculine => format!("{}º", n),
        }
    }
}

/// Localized long-date templates (`LT`, `LTS`, `L`, `LL`, `LLL`, `LLLL`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleFormats {
    pub lt: String,
    pub lts: String,
    pub l: String,
    pub ll: String,
    pub lll: String,
    pub llll: String,
}

/// Immutable language pack. Weekday tables start on Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub name: String,
    pub months: [String; MONTHS_PER_YEAR],
    pub months_short: [String; MONTHS_PER_YEAR],
    pub weekdays: [String; 7],
    pub weekdays_short: [String; 7],
    pub weekdays_min: [String; 7],
    /// First day of the week, 0 = Sunday
    pub week_start: u8,
    pub formats: LocaleFormats,
    pub ordinal: Ordinal,
}

/// Partial locale definition layered on top of a base locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleOverrides {
    /// Name of the locale to start from; defaults to the locale being
    /// overridden, or English when that does not exist yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<[String; MONTHS_PER_YEAR]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_short: Option<[String; MONTHS_PER_YEAR]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<[String; 7]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays_short: Option<[String; 7]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays_min: Option<[String; 7]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<LocaleFormats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<Ordinal>,
}

impl Locale {
    pub fn english() -> Self {
        presets::english()
    }

    pub fn german() -> Self {
        presets::german()
    }

    pub fn french() -> Self {
        presets::french()
    }

    pub fn italian() -> Self {
        presets::italian()
    }

    /// First day of the week, 0 = Sunday
    pub fn first_day_of_week(&self) -> u8 {
        self.week_start
    }

    pub fn long_months(&self) -> &[String] {
        &self.months
    }

    pub fn short_months(&self) -> &[String] {
        &self.months_short
    }

    pub fn long_days_of_week(&self) -> &[String] {
        &self.weekdays
    }

    pub fn short_days_of_week(&self) -> &[String] {
        &self.weekdays_short
    }

    pub fn narrow_days_of_week(&self) -> &[String] {
        &self.weekdays_min
    }

    /// Copy of this locale renamed to `name` with `overrides` applied
    pub fn with_overrides(&self, name: &str, overrides: &LocaleOverrides) -> Locale {
        let mut locale = self.clone();
        locale.name = name.to_string();
        if let Some(months) = &overrides.months {
            locale.months = months.clone();
        }
        if let Some(months_short) = &overrides.months_short {
            locale.months_short = months_short.clone();
        }
        if let Some(weekdays) = &overrides.weekdays {
            locale.weekdays = weekdays.clone();
        }
        if let Some(weekdays_short) = &overrides.weekdays_short {
            locale.weekdays_short = weekdays_short.clone();
        }
        if let Some(weekdays_min) = &overrides.weekdays_min {
            locale.weekdays_min = weekdays_min.clone();
        }
        if let Some(week_start) = overrides.week_start {
            locale.week_start = week_start;
        }
        if let Some(formats) = &overrides.formats {
            locale.formats = formats.clone();
        }
        if let Some(ordinal) = overrides.ordinal {
            locale.ordinal = ordinal;
        }
        locale
    }

    /// Check that the definition can be registered
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| DateTimeError::InvalidLocale {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty".to_string()));
        }
        if usize::from(self.week_start) >= DAYS_PER_WEEK {
            return Err(invalid(format!("week_start must be between 0 and 6, got {}", self.week_start)));
        }

        let tables: [(&str, &[String]); 5] = [
            ("months", &self.months),
            ("months_short", &self.months_short),
            ("weekdays", &self.weekdays),
            ("weekdays_short", &self.weekdays_short),
            ("weekdays_min", &self.weekdays_min),
        ];
        for (table, entries) in tables {
            if let Some(index) = entries.iter().position(|entry| entry.is_empty()) {
                return Err(invalid(format!("{}[{}] cannot be empty", table, index)));
            }
        }

        Ok(())
    }
}

impl Default for Locale {
    fn default() -> Self {
        presets::english()
    }
}

/// Registry of known locales plus the active one
///
/// Lookups are case-insensitive and a region-qualified name such as `de-CH`
/// falls back to its language (`de`) when it is not registered itself.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    /// Map of lowercase name -> locale
    locales: HashMap<String, Arc<Locale>>,
    active: Arc<Locale>,
}

impl LocaleRegistry {
    /// Create a registry holding the built-in locales, English active
    pub fn new() -> Self {
        let locales: HashMap<String, Arc<Locale>> = presets::all()
            .into_iter()
            .map(|locale| (locale.name.clone(), Arc::new(locale)))
            .collect();
        let active = locales
            .get(DEFAULT_LOCALE)
            .cloned()
            .unwrap_or_else(|| Arc::new(presets::english()));

        Self { locales, active }
    }

    /// Add or replace a locale definition
    ///
    /// # Returns
    /// The normalized name the locale is registered under
    pub fn register(&mut self, mut locale: Locale) -> Result<String> {
        locale.name = locale.name.trim().to_ascii_lowercase();
        locale.validate()?;

        let name = locale.name.clone();
        let locale = Arc::new(locale);
        if self.active.name == name {
            self.active = locale.clone();
        }
        self.locales.insert(name.clone(), locale);
        debug!("{}: {}", LOG_LOCALE_REGISTERED, name);
        Ok(name)
    }

    /// Register `overrides` under `name`, starting from the named base
    pub fn register_overrides(&mut self, name: &str, overrides: &LocaleOverrides) -> Result<String> {
        let base = match &overrides.base {
            Some(base) => self
                .get(base)
                .ok_or_else(|| DateTimeError::UnknownLocale(base.clone()))?,
            None => self.get_exact(name).unwrap_or_else(|| Arc::new(presets::english())),
        };
        self.register(base.with_overrides(name, overrides))
    }

    fn get_exact(&self, name: &str) -> Option<Arc<Locale>> {
        self.locales.get(&name.trim().to_ascii_lowercase()).cloned()
    }

    /// Look up a locale by name
    pub fn get(&self, name: &str) -> Option<Arc<Locale>> {
        self.get_exact(name).or_else(|| {
            let (language, _region) = name.split_once(['-', '_'])?;
            self.get_exact(language)
        })
    }

    /// Whether `name` resolves to a registered locale
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Make `name` the active locale
    pub fn activate(&mut self, name: &str) -> Result<Arc<Locale>> {
        let locale = self.get(name).ok_or_else(|| DateTimeError::UnknownLocale(name.to_string()))?;
        if self.active.name != locale.name {
            info!("{}: {}", LOG_LOCALE_ACTIVATED, locale.name);
        }
        self.active = locale.clone();
        Ok(locale)
    }

    pub fn active(&self) -> Arc<Locale> {
        self.active.clone()
    }

    /// Sorted names of all registered locales
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.locales.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve, optionally define, and optionally activate a locale
    ///
    /// * no `preset` → the active locale's name
    /// * `custom` given → registered under `preset` on top of its base
    /// * unknown `preset` → the active name, or `None` when `is_local`
    ///
    /// The active locale only changes when `is_local` is false.
    pub fn locale(&mut self, preset: Option<&str>, custom: Option<&LocaleOverrides>, is_local: bool) -> Option<String> {
        let Some(preset) = preset else {
            return Some(self.active.name.clone());
        };

        let resolved = match custom {
            Some(overrides) => match self.register_overrides(preset, overrides) {
                Ok(name) => Some(name),
                Err(e) => {
                    warn!("Rejected locale definition '{}': {}", preset, e);
                    None
                }
            },
            None => self.get(preset).map(|locale| locale.name.clone()),
        };

        match resolved {
            Some(name) => {
                if !is_local {
                    // The name was just resolved, so activation cannot fail.
                    let _ = self.activate(&name);
                }
                Some(name)
            }
            None => {
                warn!("{}: {}", LOG_LOCALE_UNKNOWN, preset);
                if is_local {
                    None
                } else {
                    Some(self.active.name.clone())
                }
            }
        }
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<RwLock<LocaleRegistry>> = Lazy::new(|| RwLock::new(LocaleRegistry::new()));

fn with_registry<T>(f: impl FnOnce(&LocaleRegistry) -> T) -> T {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    f(&registry)
}

fn with_registry_mut<T>(f: impl FnOnce(&mut LocaleRegistry) -> T) -> T {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut registry)
}

/// The active locale
pub fn current() -> Arc<Locale> {
    with_registry(LocaleRegistry::active)
}

/// Look up a registered locale by name
pub fn get(name: &str) -> Option<Arc<Locale>> {
    with_registry(|registry| registry.get(name))
}

/// Sorted names of all registered locales
pub fn available_locales() -> Vec<String> {
    with_registry(LocaleRegistry::names)
}

/// Set, define or query the active locale; see [`LocaleRegistry::locale`]
pub fn date_time_locale(preset: Option<&str>, custom: Option<&LocaleOverrides>, is_local: bool) -> Option<String> {
    with_registry_mut(|registry| registry.locale(preset, custom, is_local))
}

/// Register a complete locale definition without activating it
pub fn register_locale(locale: Locale) -> Result<String> {
    with_registry_mut(|registry| registry.register(locale))
}

/// Register `overrides` under `name` without activating it
pub fn register_overrides(name: &str, overrides: &LocaleOverrides) -> Result<String> {
    with_registry_mut(|registry| registry.register_overrides(name, overrides))
}

/// Make a registered locale active
pub fn activate(name: &str) -> Result<Arc<Locale>> {
    with_registry_mut(|registry| registry.activate(name))
}

/// First day of the week of the active locale, 0 = Sunday
pub fn first_day_of_week() -> u8 {
    current().first_day_of_week()
}

pub fn long_months() -> Vec<String> {
    current().long_months().to_vec()
}

pub fn short_months() -> Vec<String> {
    current().short_months().to_vec()
}

pub fn long_days_of_week() -> Vec<String> {
    current().long_days_of_week().to_vec()
}

pub fn short_days_of_week() -> Vec<String> {
    current().short_days_of_week().to_vec()
}

pub fn narrow_days_of_week() -> Vec<String> {
    current().narrow_days_of_week().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_is_case_insensitive_with_region_fallback() {
        let registry = LocaleRegistry::new();
        assert_eq!(registry.get("DE").unwrap().name, "de");
        assert_eq!(registry.get("de-CH").unwrap().name, "de");
        assert_eq!(registry.get("fr_CA").unwrap().name, "fr");
        assert!(registry.get("xx").is_none());
        assert!(registry.get("xx-YY").is_none());
    }

    #[test]
    fn test_registry_local_resolution_keeps_active() {
        let mut registry = LocaleRegistry::new();
        assert_eq!(registry.locale(Some("it"), None, true), Some("it".to_string()));
        assert_eq!(registry.active().name, "en");
        assert_eq!(registry.locale(Some("nope"), None, true), None);
        assert_eq!(registry.locale(Some("nope"), None, false), Some("en".to_string()));
        assert_eq!(registry.locale(None, None, false), Some("en".to_string()));
    }

    #[test]
    fn test_registry_custom_definition() {
        let mut registry = LocaleRegistry::new();
        let overrides = LocaleOverrides {
            base: Some("de".to_string()),
            week_start: Some(0),
            ..Default::default()
        };

        assert_eq!(registry.locale(Some("de-CH"), Some(&overrides), false), Some("de-ch".to_string()));
        let active = registry.active();
        assert_eq!(active.name, "de-ch");
        assert_eq!(active.months[0], "Januar");
        assert_eq!(active.week_start, 0);
    }

    #[test]
    fn test_replacing_active_locale_updates_it() {
        let mut registry = LocaleRegistry::new();
        let overrides = LocaleOverrides {
            week_start: Some(1),
            ..Default::default()
        };
        registry.register_overrides("en", &overrides).unwrap();
        assert_eq!(registry.active().week_start, 1);
    }

    #[test]
    fn test_invalid_definition_is_rejected() {
        let mut registry = LocaleRegistry::new();
        let overrides = LocaleOverrides {
            week_start: Some(7),
            ..Default::default()
        };
        assert!(registry.register_overrides("broken", &overrides).is_err());
        assert!(registry.get("broken").is_none());

        let unknown_base = LocaleOverrides {
            base: Some("zz".to_string()),
            ..Default::default()
        };
        assert_eq!(
            registry.register_overrides("other", &unknown_base),
            Err(DateTimeError::UnknownLocale("zz".to_string()))
        );
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(Ordinal::English.apply(1), "1st");
        assert_eq!(Ordinal::English.apply(2), "2nd");
        assert_eq!(Ordinal::English.apply(3), "3rd");
        assert_eq!(Ordinal::English.apply(11), "11th");
        assert_eq!(Ordinal::English.apply(22), "22nd");
        assert_eq!(Ordinal::Period.apply(22), "22.");
        assert_eq!(Ordinal::French.apply(1), "1er");
        assert_eq!(Ordinal::French.apply(2), "2");
        assert_eq!(Ordinal::Masculine.apply(5), "5º");
    }
}
