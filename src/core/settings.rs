//! Export settings
//!
//! The two admin-editable settings that drive both engines: the custom
//! field list and the exported flag (marker) name. They are persisted as
//! plain string options in the shop's settings store and loaded once per
//! invocation. The engines receive the parsed value at construction.

use crate::adapters::store::SettingsStore;
use crate::core::export::FIXED_COLUMNS;
use crate::domain::Result;

/// Option holding the comma-joined custom field list
pub const CUSTOM_FIELDS_OPTION: &str = "wc_order_exporter_custom_fields";

/// Option holding the marker field name
pub const EXPORTED_FLAG_OPTION: &str = "wc_order_exporter_exported_flag";

/// Parsed export settings
///
/// # Examples
///
/// ```
/// use order_exporter::core::settings::ExportSettings;
///
/// let settings = ExportSettings::from_options(Some(" sku , region "), Some("_exported"));
/// assert_eq!(settings.custom_field_names(), ["sku", "region"]);
/// assert_eq!(settings.marker_field_name(), "_exported");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSettings {
    custom_field_names: Vec<String>,
    marker_field_name: String,
}

impl ExportSettings {
    /// Build settings from already-split field names
    ///
    /// Names go through the same cleanup as the stored option.
    pub fn new(custom_field_names: Vec<String>, marker_field_name: impl Into<String>) -> Self {
        Self {
            custom_field_names: normalize_field_names(custom_field_names.iter().map(String::as_str)),
            marker_field_name: marker_field_name.into(),
        }
    }

    /// Build settings from the raw option values; unset options count as empty
    pub fn from_options(custom_fields: Option<&str>, exported_flag: Option<&str>) -> Self {
        Self {
            custom_field_names: parse_custom_fields(custom_fields.unwrap_or("")),
            marker_field_name: exported_flag.unwrap_or("").to_string(),
        }
    }

    /// Read both options from the settings store
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read
    pub async fn load(store: &dyn SettingsStore) -> Result<Self> {
        let custom_fields = store.get_option(CUSTOM_FIELDS_OPTION).await?;
        let exported_flag = store.get_option(EXPORTED_FLAG_OPTION).await?;
        let settings = Self::from_options(custom_fields.as_deref(), exported_flag.as_deref());

        tracing::debug!(
            custom_fields = ?settings.custom_field_names,
            marker_field = %settings.marker_field_name,
            "Loaded export settings"
        );

        Ok(settings)
    }

    /// Custom field names, in configured order
    pub fn custom_field_names(&self) -> &[String] {
        &self.custom_field_names
    }

    /// Marker field name, verbatim (may be empty)
    pub fn marker_field_name(&self) -> &str {
        &self.marker_field_name
    }

    /// Whether the marker name is empty; still legal, the empty key is used
    pub fn has_empty_marker(&self) -> bool {
        self.marker_field_name.is_empty()
    }
}

/// Split a comma-joined field list into CSV column names
///
/// Each name is trimmed and blank names are skipped, so an empty option gives
/// no extra columns and `"sku,"` gives just `sku`. Every column name appears
/// once in the output: a repeated name keeps its first position, and a name
/// equal to a fixed column is dropped.
pub fn parse_custom_fields(raw: &str) -> Vec<String> {
    normalize_field_names(raw.split(','))
}

fn normalize_field_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();

    for name in names.into_iter().map(str::trim) {
        if name.is_empty() || fields.iter().any(|f| f == name) {
            continue;
        }
        if FIXED_COLUMNS.contains(&name) {
            tracing::warn!(field = %name, "Custom field duplicates a fixed column, ignoring");
            continue;
        }
        fields.push(name.to_string());
    }

    fields
}
