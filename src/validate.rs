// Local draft validation. Runs before any request is issued; a draft that
// fails here never reaches the network.

use crate::book::{BookDraft, Field, FieldErrors, NewBook};
use chrono::Datelike;

/// Upper bound, in characters, for every text field.
pub const MAX_TEXT_LEN: usize = 255;

/// Earliest accepted publication year. The latest is the current year.
pub const MIN_PUBLISHED_YEAR: i32 = 1000;

/// Calendar year on the local clock; the upper bound for `published_year`.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Check every field of `draft` and return the create payload on success.
///
/// On failure every offending field gets exactly one message; fields that
/// pass have none.
pub fn validate_draft(draft: &BookDraft, current_year: i32) -> Result<NewBook, FieldErrors> {
    let mut errors = FieldErrors::default();

    for field in [Field::Title, Field::Author, Field::Genre, Field::Description] {
        if let Some(message) = check_text(field, draft.get(field)) {
            errors.insert(field, message);
        }
    }

    let year = match parse_year(&draft.published_year, current_year) {
        Ok(year) => Some(year),
        Err(message) => {
            errors.insert(Field::PublishedYear, message);
            None
        }
    };

    match year {
        Some(published_year) if errors.is_empty() => Ok(NewBook {
            title: draft.title.clone(),
            author: draft.author.clone(),
            published_year,
            genre: draft.genre.clone(),
            description: draft.description.clone(),
        }),
        _ => Err(errors),
    }
}

fn check_text(field: Field, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} is required.", field.label()));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Some(format!(
            "{} must not exceed {} characters.",
            field.label(),
            MAX_TEXT_LEN
        ));
    }
    None
}

fn parse_year(raw: &str, current_year: i32) -> Result<i32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Published Year is required.".into());
    }
    let year: i32 = raw
        .parse()
        .map_err(|_| "Published Year must be a whole number.".to_string())?;
    if !(MIN_PUBLISHED_YEAR..=current_year).contains(&year) {
        return Err(format!(
            "Published Year must be between {} and {}.",
            MIN_PUBLISHED_YEAR, current_year
        ));
    }
    Ok(year)
}
