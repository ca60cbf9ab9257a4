/// Allow-listed text record keys. Anything outside this enum is rejected by
/// the text-change projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Avatar,
    Banner,
    Url,
    Description,
    Email,
    Twitter,
    Github,
    Discord,
    Telegram,
}

impl TextField {
    /// Parse a raw on-chain record key; `None` for keys outside the allow-list
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "avatar" => Some(TextField::Avatar),
            "banner" => Some(TextField::Banner),
            "url" => Some(TextField::Url),
            "description" => Some(TextField::Description),
            "email" => Some(TextField::Email),
            "com.twitter" => Some(TextField::Twitter),
            "com.github" => Some(TextField::Github),
            "com.discord" => Some(TextField::Discord),
            "org.telegram" => Some(TextField::Telegram),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_allowed_keys() {
        assert_eq!(TextField::parse("avatar"), Some(TextField::Avatar));
        assert_eq!(TextField::parse("com.twitter"), Some(TextField::Twitter));
        assert_eq!(TextField::parse("org.telegram"), Some(TextField::Telegram));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(TextField::parse("not-a-real-field"), None);
        assert_eq!(TextField::parse("twitter"), None);
    }
}
