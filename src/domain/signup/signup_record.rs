use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_derive::Serialize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupRecordError {
    #[error("signup form is missing a non-empty `email` field")]
    MissingEmail,
}

/// One submitted signup form, kept as the flat string fields the client sent.
///
/// Field order follows the submission order so the stored item, the
/// notification body and the `201` echo all line up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignupRecord {
    fields: IndexMap<String, String>,
}

impl SignupRecord {
    pub const EMAIL_FIELD: &'static str = "email";

    /// Builds a record from decoded form pairs. A repeated field name keeps
    /// its first value.
    pub fn from_form_fields<I>(pairs: I) -> Result<Self, SignupRecordError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: IndexMap<String, String> = IndexMap::new();
        for (name, value) in pairs {
            if let Entry::Vacant(vac) = fields.entry(name) {
                vac.insert(value);
            }
        }

        match fields.get(Self::EMAIL_FIELD) {
            Some(email) if !email.is_empty() => Ok(SignupRecord { fields }),
            _ => Err(SignupRecordError::MissingEmail),
        }
    }

    pub fn email(&self) -> &str {
        self.get(Self::EMAIL_FIELD).unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn notification_subject(&self) -> String {
        format!("New signup: {}", self.email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn keeps_submission_order_in_json() {
        let record = SignupRecord::from_form_fields(pairs(&[
            ("name", "Alice"),
            ("email", "a@example.com"),
            ("previewAccess", "Yes"),
        ]))
        .unwrap();

        assert_eq!(
            record.to_json().unwrap(),
            r#"{"name":"Alice","email":"a@example.com","previewAccess":"Yes"}"#
        );
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn first_value_wins_for_repeated_field() {
        let record = SignupRecord::from_form_fields(pairs(&[
            ("email", "first@example.com"),
            ("email", "second@example.com"),
        ]))
        .unwrap();

        assert_eq!(record.email(), "first@example.com");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn values_are_kept_verbatim() {
        let record = SignupRecord::from_form_fields(pairs(&[
            ("email", "a@example.com"),
            ("age", "042"),
            ("note", "  spaced  "),
        ]))
        .unwrap();

        assert_eq!(record.get("age"), Some("042"));
        assert_eq!(record.get("note"), Some("  spaced  "));
    }

    #[test]
    fn rejects_missing_or_empty_email() {
        assert_eq!(
            SignupRecord::from_form_fields(pairs(&[("name", "Alice")])),
            Err(SignupRecordError::MissingEmail)
        );
        assert_eq!(
            SignupRecord::from_form_fields(pairs(&[("email", ""), ("name", "Alice")])),
            Err(SignupRecordError::MissingEmail)
        );
    }

    #[test]
    fn subject_names_the_email() {
        let record = SignupRecord::from_form_fields(pairs(&[("email", "a@example.com")])).unwrap();
        assert_eq!(record.notification_subject(), "New signup: a@example.com");
    }
}
