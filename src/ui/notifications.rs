//! Transient notifications
//!
//! Short messages (export finished, export failed) that disappear after a
//! fixed time.

use std::time::{Duration, Instant};

use eframe::egui;
use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of visible notifications.
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    ttl: Duration,
}

impl Notifications {
    /// Creates an empty queue whose messages live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { items: Vec::new(), ttl }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>, now: Instant) {
        self.items.push(Notification { level, message: message.into(), expires_at: now + self.ttl });
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(NotificationLevel::Info, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(NotificationLevel::Error, message, now);
    }

    /// Drops expired notifications.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Time until the next notification expires.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.items.iter().map(|n| n.expires_at.saturating_duration_since(now)).min()
    }
}

/// Renders the visible notifications stacked vertically.
pub fn render_notifications(ui: &mut egui::Ui, notifications: &Notifications) {
    for notification in notifications.iter() {
        let (icon, color) = match notification.level {
            NotificationLevel::Info => ("ℹ", ui.visuals().text_color()),
            NotificationLevel::Error => ("⚠", Color32::from_rgb(220, 80, 80)),
        };
        ui.colored_label(color, format!("{} {}", icon, notification.message));
    }
}
