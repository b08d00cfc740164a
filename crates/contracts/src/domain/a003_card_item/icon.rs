//! Icon resolution for card items.
//!
//! An explicit local icon always wins. The "use site icon" choice resolves,
//! in order: the icon fetched during this session, the icon the edited item
//! already had, then the favicon service URL for the item's url.

use super::aggregate::CardItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconChoice {
    UseSiteIcon,
    Local(String),
}

impl IconChoice {
    /// Map the icon picker's value; an empty selection behaves like the sentinel
    pub fn from_selection(value: &str, sentinel: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == sentinel {
            IconChoice::UseSiteIcon
        } else {
            IconChoice::Local(value.to_string())
        }
    }
}

/// Where site icons come from for one editor session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSource {
    pub favicon_endpoint: String,
    pub sentinel: String,
    pub session_icon: Option<String>,
}

impl IconSource {
    pub fn new(favicon_endpoint: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self {
            favicon_endpoint: favicon_endpoint.into(),
            sentinel: sentinel.into(),
            session_icon: None,
        }
    }

    pub fn with_session_icon(mut self, icon_url: Option<String>) -> Self {
        self.session_icon = icon_url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn favicon_url(&self, url: &str) -> String {
        format!("{}{}", self.favicon_endpoint, urlencoding::encode(url))
    }
}

/// Returns `(icon, icon_url)` for the stored item
pub fn resolve_icon(
    choice: &IconChoice,
    url: &str,
    source: &IconSource,
    previous: Option<&CardItem>,
) -> (Option<String>, Option<String>) {
    match choice {
        IconChoice::Local(name) => (Some(name.clone()), None),
        IconChoice::UseSiteIcon => {
            let icon_url = source
                .session_icon
                .clone()
                .or_else(|| previous.and_then(|p| p.icon_url.clone()))
                .unwrap_or_else(|| source.favicon_url(url));
            (Some(source.sentinel.clone()), Some(icon_url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "use-website-icon.png";

    fn previous_with_icon() -> CardItem {
        CardItem {
            url: "https://old.test".into(),
            title: "Old".into(),
            description: String::new(),
            icon: Some(SENTINEL.into()),
            icon_url: Some("https://cdn.test/old.ico".into()),
            card_type: "card2".into(),
        }
    }

    #[test]
    fn test_local_icon_suppresses_site_icon() {
        let source = IconSource::new("https://fav.test/?d=", SENTINEL)
            .with_session_icon(Some("https://fetched.test/i.png".into()));
        let prev = previous_with_icon();
        let resolved = resolve_icon(
            &IconChoice::Local("a-hua5.png".into()),
            "https://x.test",
            &source,
            Some(&prev),
        );
        assert_eq!(resolved, (Some("a-hua5.png".into()), None));
    }

    #[test]
    fn test_site_icon_priority_order() {
        let prev = previous_with_icon();
        let fetched = IconSource::new("https://fav.test/?d=", SENTINEL)
            .with_session_icon(Some("https://fetched.test/i.png".into()));
        assert_eq!(
            resolve_icon(&IconChoice::UseSiteIcon, "https://x.test", &fetched, Some(&prev)).1,
            Some("https://fetched.test/i.png".into())
        );

        let plain = IconSource::new("https://fav.test/?d=", SENTINEL);
        assert_eq!(
            resolve_icon(&IconChoice::UseSiteIcon, "https://x.test", &plain, Some(&prev)).1,
            Some("https://cdn.test/old.ico".into())
        );
        assert_eq!(
            resolve_icon(&IconChoice::UseSiteIcon, "https://x.test", &plain, None).1,
            Some("https://fav.test/?d=https%3A%2F%2Fx.test".into())
        );
    }

    #[test]
    fn test_selection_mapping() {
        assert_eq!(IconChoice::from_selection("", SENTINEL), IconChoice::UseSiteIcon);
        assert_eq!(IconChoice::from_selection(SENTINEL, SENTINEL), IconChoice::UseSiteIcon);
        assert_eq!(
            IconChoice::from_selection("a-hua1.png", SENTINEL),
            IconChoice::Local("a-hua1.png".into())
        );
    }
}
