use thiserror::Error;

/// Maximum title length in characters, matching the column constraint.
pub const TITLE_MAX_CHARS: usize = 200;

/// Raw values bound from a submitted add-article form.
///
/// Kept as-submitted so a failed validation can re-render the form with
/// the user's input still in place.
#[derive(Debug, Default, Clone)]
pub struct ArticleInput {
    pub title: String,
    pub body: String,
    pub image: Option<UploadedImage>,
}

/// An uploaded file part: original client file name plus contents.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Validated article fields, ready to persist.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[error("article validation failed")]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ArticleInput {
    /// Checks the field constraints and produces a persistable article.
    ///
    /// Title and body are trimmed before checking; the trimmed values are
    /// what gets stored. The image is not validated here, an absent or
    /// empty upload is simply no image.
    pub fn validate(&self) -> Result<NewArticle, ValidationErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "This field is required."));
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.push(FieldError::new(
                "title",
                "Ensure this value has at most 200 characters.",
            ));
        }

        let body = self.body.trim();
        if body.is_empty() {
            errors.push(FieldError::new("body", "This field is required."));
        }

        if errors.is_empty() {
            Ok(NewArticle {
                title: title.to_string(),
                body: body.to_string(),
            })
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, body: &str) -> ArticleInput {
        ArticleInput {
            title: title.to_string(),
            body: body.to_string(),
            image: None,
        }
    }

    #[test]
    fn test_valid_input() {
        let article = input("Test", "Body text").validate().unwrap();
        assert_eq!(article.title, "Test");
        assert_eq!(article.body, "Body text");
    }

    #[test]
    fn test_values_are_trimmed() {
        let article = input("  Test  ", "\nBody text\n").validate().unwrap();
        assert_eq!(article.title, "Test");
        assert_eq!(article.body, "Body text");
    }

    #[test]
    fn test_empty_title_rejected() {
        let errors = input("", "Body text").validate().unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "title");
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let errors = input("   ", "Body text").validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "title");
    }

    #[test]
    fn test_empty_body_rejected() {
        let errors = input("Test", "").validate().unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "body");
    }

    #[test]
    fn test_both_fields_empty_reports_both() {
        let errors = input("", "").validate().unwrap_err();
        let fields: Vec<_> = errors.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[test]
    fn test_title_at_length_limit_accepted() {
        let title = "a".repeat(TITLE_MAX_CHARS);
        assert!(input(&title, "Body").validate().is_ok());
    }

    #[test]
    fn test_title_over_length_limit_rejected() {
        let title = "a".repeat(TITLE_MAX_CHARS + 1);
        let errors = input(&title, "Body").validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "title");
    }

    #[test]
    fn test_length_limit_counts_characters_not_bytes() {
        // 200 multibyte characters are within the limit
        let title = "й".repeat(TITLE_MAX_CHARS);
        assert!(input(&title, "Body").validate().is_ok());
    }

    #[test]
    fn test_image_is_optional() {
        let mut with_image = input("Test", "Body");
        with_image.image = Some(UploadedImage {
            file_name: "photo.jpg".to_string(),
            data: vec![1, 2, 3],
        });
        assert!(with_image.validate().is_ok());
    }
}
