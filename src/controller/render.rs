use crate::domain::Classification;

pub const LOW_CONFIDENCE_WARNING: &str = "⚠️ Low confidence in classification";

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Details block for a classification. Category and summary are inserted as-is.
pub fn details_markup(classification: &Classification) -> String {
    let confidence_class = if classification.is_confident {
        "confidence"
    } else {
        "confidence low-confidence"
    };
    let warning = if classification.is_confident {
        String::new()
    } else {
        format!("<p class=\"warning\">{LOW_CONFIDENCE_WARNING}</p>\n")
    };
    format!(
        "<p><strong>Main Category:</strong> <span class=\"category-tag\">{}</span></p>\n\
         <p><strong>Confidence:</strong> <span class=\"{}\">{}</span></p>\n\
         {}\
         <p><strong>Summary:</strong> <span class=\"category-tag\">{}</span></p>\n",
        classification.main_category,
        confidence_class,
        format_confidence(classification.confidence),
        warning,
        classification.summary
    )
}

pub fn error_markup(message: &str) -> String {
    format!("<p class=\"error\">Error processing email: {message}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(confidence: f64, is_confident: bool) -> Classification {
        Classification {
            main_category: "billing".into(),
            confidence,
            is_confident,
            summary: "Customer requests refund".into(),
        }
    }

    #[test]
    fn confidence_has_one_decimal() {
        assert_eq!(format_confidence(0.87), "87.0%");
        assert_eq!(format_confidence(0.0), "0.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.12345), "12.3%");
    }

    #[test]
    fn low_confidence_follows_the_flag_not_the_number() {
        let confident = details_markup(&classification(0.10, true));
        assert!(!confident.contains("low-confidence"));
        assert!(!confident.contains(LOW_CONFIDENCE_WARNING));

        let unsure = details_markup(&classification(0.99, false));
        assert!(unsure.contains("low-confidence"));
        assert!(unsure.contains(LOW_CONFIDENCE_WARNING));
    }

    #[test]
    fn category_is_inserted_as_markup() {
        let mut c = classification(0.5, true);
        c.main_category = "<em>billing</em>".into();
        assert!(details_markup(&c).contains("<span class=\"category-tag\"><em>billing</em></span>"));
    }
}
