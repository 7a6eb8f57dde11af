/// What subset of the question bank is being studied.
///
/// `None` for `year` or `subject` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year: Option<u16>,
    pub subject: Option<String>,
    pub search_text: String,
}

impl FilterCriteria {
    pub fn new(subject: Option<String>, year: Option<u16>) -> Self {
        Self {
            year,
            subject,
            search_text: String::new(),
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    /// Short description for headers, e.g. `Biologia · 2024`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(subject) = &self.subject {
            parts.push(subject.clone());
        }
        if let Some(year) = self.year {
            parts.push(format!("PAS {}", year));
        }
        if !self.search_text.is_empty() {
            parts.push(format!("\"{}\"", self.search_text));
        }
        if parts.is_empty() {
            "All questions".to_string()
        } else {
            parts.join(" · ")
        }
    }
}
