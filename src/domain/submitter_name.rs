use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct SubmitterName(String);

impl SubmitterName {
    /// Accepts any non-blank name up to 256 graphemes. Markup characters are
    /// allowed since every rendered field is escaped.
    pub fn parse(s: String) -> Result<SubmitterName, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("name must not be empty.".to_string());
        }
        if s.graphemes(true).count() > 256 {
            return Err(format!("{} is too long to be a valid name.", s));
        }
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for SubmitterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
