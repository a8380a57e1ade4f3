//! Hidden-form-field extraction.
//!
//! The logon page embeds opaque anti-forgery/view-state values in hidden
//! inputs; each submission must echo the set the previous response carried.

use scraper::{Html, Selector};

use crate::error::Error;

/// The anti-forgery/view-state fields the logon form carries, in submission
/// order.
pub const LOGON_FORM_FIELDS: [&str; 4] = [
    "__VIEWSTATE",
    "__VIEWSTATEGENERATOR",
    "__VIEWSTATEENCRYPTED",
    "__EVENTVALIDATION",
];

/// Ordered form field set extracted from a page, ready for resubmission.
#[derive(Debug, Clone, Default)]
pub struct FormTokens(Vec<(&'static str, String)>);

impl FormTokens {
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Extract the named hidden fields from a parsed page, in the given order.
///
/// The first absent field aborts extraction and is named in the error; no
/// partial set is returned. A present field with an empty `value` is kept.
pub fn extract_hidden_fields(
    document: &Html,
    fields: &[&'static str],
) -> Result<FormTokens, Error> {
    let mut tokens = FormTokens::default();
    for &field in fields {
        let selector = Selector::parse(&format!(r#"input[name="{field}"]"#))
            .map_err(|err| Error::Parse(format!("selector for {field}: {err}")))?;
        let value = document
            .select(&selector)
            .next()
            .and_then(|input| input.value().attr("value"))
            .ok_or(Error::MissingToken(field))?;
        tokens.push(field, value);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGON_PAGE: &str = r#"<html><body><form id="form1">
        <input type="hidden" name="__VIEWSTATE" value="vs" />
        <input type="hidden" name="__VIEWSTATEGENERATOR" value="gen" />
        <input type="hidden" name="__VIEWSTATEENCRYPTED" value="" />
        <input type="hidden" name="__EVENTVALIDATION" value="ev" />
        <input type="text" name="Login1$UserName" value="" />
    </form></body></html>"#;

    #[test]
    fn test_extracts_all_fields_in_order() {
        let document = Html::parse_document(LOGON_PAGE);
        let tokens = extract_hidden_fields(&document, &LOGON_FORM_FIELDS).unwrap();
        let names: Vec<&str> = tokens.pairs().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, LOGON_FORM_FIELDS);
        assert_eq!(tokens.get("__VIEWSTATE"), Some("vs"));
        assert_eq!(tokens.get("__VIEWSTATEGENERATOR"), Some("gen"));
        assert_eq!(tokens.get("__EVENTVALIDATION"), Some("ev"));
    }

    #[test]
    fn test_empty_value_is_kept() {
        let document = Html::parse_document(LOGON_PAGE);
        let tokens = extract_hidden_fields(&document, &LOGON_FORM_FIELDS).unwrap();
        assert_eq!(tokens.get("__VIEWSTATEENCRYPTED"), Some(""));
    }

    #[test]
    fn test_missing_field_named_and_nothing_returned() {
        let page = LOGON_PAGE.replace("__EVENTVALIDATION", "__SOMETHINGELSE");
        let document = Html::parse_document(&page);
        let err = extract_hidden_fields(&document, &LOGON_FORM_FIELDS).unwrap_err();
        assert!(matches!(err, Error::MissingToken("__EVENTVALIDATION")));
        assert_eq!(err.to_string(), "__EVENTVALIDATION not found");
    }

    #[test]
    fn test_input_without_value_attribute_is_missing() {
        let page = r#"<input type="hidden" name="__VIEWSTATE" />"#;
        let document = Html::parse_document(page);
        let err = extract_hidden_fields(&document, &["__VIEWSTATE"]).unwrap_err();
        assert!(matches!(err, Error::MissingToken("__VIEWSTATE")));
    }
}
