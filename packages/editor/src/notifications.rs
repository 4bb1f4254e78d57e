//! Transient and persistent messages shown by the host shell.

use std::time::{Duration, Instant};

/// How long a toast stays up
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Dismisses itself after [`TOAST_DURATION`]
    Toast,
    /// Stays until dismissed, may carry a link
    Warning,
    /// Blocking; stays until acknowledged
    Alert,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Toast => "toast",
            NoticeKind::Warning => "warning",
            NoticeKind::Alert => "alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub link: Option<(String, String)>,
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn is_active(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires| now < expires)
    }
}

#[derive(Debug, Default)]
pub struct Notifications {
    notices: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toast(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(NoticeKind::Toast, message.into(), None, Some(now + TOAST_DURATION))
    }

    /// Persistent warning with a link (`label`, `href`)
    pub fn warning(&mut self, message: impl Into<String>, link: Option<(&str, &str)>) -> u64 {
        let link = link.map(|(label, href)| (label.to_string(), href.to_string()));
        self.push(NoticeKind::Warning, message.into(), link, None)
    }

    pub fn alert(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Alert, message.into(), None, None)
    }

    fn push(
        &mut self,
        kind: NoticeKind,
        message: String,
        link: Option<(String, String)>,
        expires_at: Option<Instant>,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            kind,
            message,
            link,
            expires_at,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|notice| notice.is_active(now));
    }

    pub fn active(&self, now: Instant) -> Vec<&Notice> {
        self.notices
            .iter()
            .filter(|notice| notice.is_active(now))
            .collect()
    }

    /// A blocking alert is up
    pub fn has_alert(&self) -> bool {
        self.notices
            .iter()
            .any(|notice| notice.kind == NoticeKind::Alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let now = Instant::now();
        let mut notifications = Notifications::new();
        notifications.toast("Saved", now);

        assert_eq!(notifications.active(now).len(), 1);
        assert_eq!(notifications.active(now + Duration::from_millis(3999)).len(), 1);
        assert!(notifications.active(now + TOAST_DURATION).is_empty());

        notifications.prune(now + TOAST_DURATION);
        assert!(notifications.active(now).is_empty());
    }

    #[test]
    fn test_warning_persists_until_dismissed() {
        let now = Instant::now();
        let mut notifications = Notifications::new();
        let id = notifications.warning("Log in", Some(("Log in", "/login")));

        let later = now + Duration::from_secs(3600);
        notifications.prune(later);
        let active = notifications.active(later);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].link, Some(("Log in".to_string(), "/login".to_string())));

        notifications.dismiss(id);
        assert!(notifications.active(later).is_empty());
    }

    #[test]
    fn test_alert_is_blocking() {
        let mut notifications = Notifications::new();
        assert!(!notifications.has_alert());
        let id = notifications.alert("Revert failed");
        assert!(notifications.has_alert());
        notifications.dismiss(id);
        assert!(!notifications.has_alert());
    }
}
