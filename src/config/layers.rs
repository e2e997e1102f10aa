//! Override-beats-raw precedence for partial configurations.

use super::raw::RawConfig;

/// The two user-facing sources of a configuration value.
///
/// Every lookup consults the override parameters first and the base
/// configuration second; neither source is ever modified.
#[derive(Debug, Clone, Copy)]
pub struct Layers<'a> {
    overrides: &'a RawConfig,
    raw: &'a RawConfig,
}

impl<'a> Layers<'a> {
    /// Creates the lookup over a base configuration and its overrides.
    #[must_use]
    pub const fn new(raw: &'a RawConfig, overrides: &'a RawConfig) -> Self {
        Self { overrides, raw }
    }

    /// Returns the first value present, override before raw.
    pub fn get<T: 'a>(&self, field: impl Fn(&'a RawConfig) -> &'a Option<T>) -> Option<&'a T> {
        first_present(field(self.overrides).as_ref(), field(self.raw).as_ref())
    }

    /// Returns the first value present, or `default` if neither source has one.
    pub fn or<T: Clone + 'a>(
        &self,
        field: impl Fn(&'a RawConfig) -> &'a Option<T>,
        default: T,
    ) -> T {
        self.get(field).cloned().unwrap_or(default)
    }

    /// Like [`or`](Self::or), computing the default only when it is needed.
    pub fn or_else<T: Clone + 'a>(
        &self,
        field: impl Fn(&'a RawConfig) -> &'a Option<T>,
        default: impl FnOnce() -> T,
    ) -> T {
        self.get(field).cloned().unwrap_or_else(default)
    }

    /// Returns `true` if either source supplies the field.
    pub fn is_present<T: 'a>(&self, field: impl Fn(&'a RawConfig) -> &'a Option<T>) -> bool {
        self.get(field).is_some()
    }
}

/// Returns `primary` if present, otherwise `fallback`.
#[must_use]
pub fn first_present<T>(primary: Option<T>, fallback: Option<T>) -> Option<T> {
    primary.or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_width(width: usize) -> RawConfig {
        RawConfig {
            patch_width: Some(width),
            ..RawConfig::default()
        }
    }

    #[test]
    fn override_wins_over_raw() {
        let raw = raw_with_width(21);
        let overrides = raw_with_width(9);

        let layers = Layers::new(&raw, &overrides);

        assert_eq!(layers.get(|c| &c.patch_width), Some(&9));
    }

    #[test]
    fn raw_used_when_override_absent() {
        let raw = raw_with_width(21);
        let overrides = RawConfig::default();

        let layers = Layers::new(&raw, &overrides);

        assert_eq!(layers.or(|c| &c.patch_width, 15), 21);
    }

    #[test]
    fn default_used_when_both_absent() {
        let empty = RawConfig::default();

        let layers = Layers::new(&empty, &empty);

        assert_eq!(layers.or(|c| &c.patch_width, 15), 15);
        assert!(!layers.is_present(|c| &c.label_ids));
    }

    #[test]
    fn first_present_prefers_primary() {
        assert_eq!(first_present(Some(1), Some(2)), Some(1));
        assert_eq!(first_present(None, Some(2)), Some(2));
        assert_eq!(first_present::<i32>(None, None), None);
    }
}
