use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 5000;

#[derive(Debug)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(s: String) -> Result<MessageBody, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("message must not be empty.".to_string());
        }
        if s.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!(
                "message is longer than {} characters.",
                MAX_GRAPHEMES
            ));
        }
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
