use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::filter::FilterParams;
use crate::domain::saved_filter::UpdateSavedFilter;

/// Maximum allowed length for a saved filter name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the saved filter form helpers.
pub type SavedFilterFormResult<T> = Result<T, SavedFilterFormError>;

/// Errors that can occur while processing saved filter payloads.
#[derive(Debug, Error)]
pub enum SavedFilterFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("filter name cannot be empty")]
    EmptyName,
}

/// Payload submitted by the "Save filter" dialog.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveFilterForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Filter currently applied to the listings.
    #[serde(default)]
    pub filter_data: FilterParams,
}

impl SaveFilterForm {
    /// Validates the payload and returns the sanitized name with the filter.
    pub fn into_parts(self) -> SavedFilterFormResult<(String, FilterParams)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(SavedFilterFormError::EmptyName);
        }

        Ok((name, self.filter_data))
    }
}

/// Payload submitted when renaming a saved filter or replacing its contents.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditSavedFilterForm {
    /// Replacement name, if any.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    /// Replacement filter payload, if any.
    pub filter_data: Option<FilterParams>,
}

impl EditSavedFilterForm {
    /// Validates the payload into a domain patch stamped with `updated_at`.
    pub fn into_update(self, updated_at: NaiveDateTime) -> SavedFilterFormResult<UpdateSavedFilter> {
        self.validate()?;

        let mut update = UpdateSavedFilter::touch(updated_at);

        if let Some(name) = self.name {
            let name = sanitize_inline_text(&name);
            if name.is_empty() {
                return Err(SavedFilterFormError::EmptyName);
            }
            update = update.name(name);
        }

        if let Some(filter_data) = self.filter_data {
            update = update.filter_data(filter_data);
        }

        Ok(update)
    }
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn save_form_sanitizes_name() {
        let form = SaveFilterForm {
            name: "  Boho \t under  500 ".to_string(),
            filter_data: FilterParams {
                styles: Some(vec!["boho".to_string()]),
                price_max: Some(500),
                ..FilterParams::default()
            },
        };

        let (name, filter_data) = form.into_parts().expect("expected valid form");

        assert_eq!(name, "Boho under 500");
        assert_eq!(filter_data.price_max, Some(500));
    }

    #[test]
    fn save_form_rejects_blank_name() {
        let form = SaveFilterForm {
            name: "   ".to_string(),
            filter_data: FilterParams::default(),
        };

        assert!(matches!(form.into_parts(), Err(SavedFilterFormError::EmptyName)));
    }

    #[test]
    fn save_form_rejects_overlong_name() {
        let form = SaveFilterForm {
            name: "x".repeat(NAME_MAX_LEN + 1),
            filter_data: FilterParams::default(),
        };

        assert!(matches!(
            form.into_parts(),
            Err(SavedFilterFormError::Validation(_))
        ));
    }

    #[test]
    fn save_form_reads_camel_case_json() {
        let form: SaveFilterForm = serde_json::from_value(serde_json::json!({
            "name": "Ivory dresses",
            "filterData": { "categories": ["dress"], "colors": ["ivory"], "sortOrder": "asc" }
        }))
        .expect("deserialize");

        assert_eq!(form.filter_data.colors, Some(vec!["ivory".to_string()]));
    }

    #[test]
    fn edit_form_without_fields_only_touches() {
        let update = EditSavedFilterForm::default()
            .into_update(timestamp())
            .expect("expected valid form");

        assert_eq!(update, UpdateSavedFilter::touch(timestamp()));
    }

    #[test]
    fn edit_form_builds_rename() {
        let form = EditSavedFilterForm {
            name: Some(" Winter\nlook ".to_string()),
            filter_data: None,
        };

        let update = form.into_update(timestamp()).expect("expected valid form");

        assert_eq!(update.name.as_deref(), Some("Winter look"));
        assert_eq!(update.filter_data, None);
        assert_eq!(update.updated_at, timestamp());
    }

    #[test]
    fn edit_form_rejects_blank_rename() {
        let form = EditSavedFilterForm {
            name: Some("\t".to_string()),
            filter_data: None,
        };

        assert!(matches!(
            form.into_update(timestamp()),
            Err(SavedFilterFormError::EmptyName)
        ));
    }
}
