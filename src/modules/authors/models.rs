use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Persisted author. Serializes as the full read shape.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub biography: Option<String>,
}

/// Reduced author projection embedded in book responses.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AuthorBrief {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Normalized author payload produced by validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorData {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub biography: Option<String>,
}

impl AuthorData {
    /// Merge onto an existing author: required fields always overwrite,
    /// optional fields keep their previous value when omitted.
    pub fn apply_to(self, author: &mut Author) {
        author.first_name = self.first_name;
        author.last_name = self.last_name;
        if let Some(birth_date) = self.birth_date {
            author.birth_date = Some(birth_date);
        }
        if let Some(biography) = self.biography {
            author.biography = Some(biography);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Author {
        Author {
            id: 1,
            first_name: "Author1".to_string(),
            last_name: "Surname1".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1960, 1, 1),
            biography: Some("About 1".to_string()),
        }
    }

    #[test]
    fn omitted_optional_fields_keep_previous_values() {
        let mut author = existing();
        AuthorData {
            first_name: "New".to_string(),
            last_name: "Name".to_string(),
            birth_date: None,
            biography: None,
        }
        .apply_to(&mut author);

        assert_eq!(author.first_name, "New");
        assert_eq!(author.last_name, "Name");
        assert_eq!(author.birth_date, NaiveDate::from_ymd_opt(1960, 1, 1));
        assert_eq!(author.biography.as_deref(), Some("About 1"));
    }

    #[test]
    fn supplied_optional_fields_overwrite() {
        let mut author = existing();
        AuthorData {
            first_name: "New".to_string(),
            last_name: "Name".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 2),
            biography: Some("About...".to_string()),
        }
        .apply_to(&mut author);

        assert_eq!(author.birth_date, NaiveDate::from_ymd_opt(1970, 1, 2));
        assert_eq!(author.biography.as_deref(), Some("About..."));
    }
}
