//! User-facing notification and confirmation seams.
//!
//! The collection logic only talks to these traits; the Leptos toast host and
//! confirm modal (`layout::toast_service`, `layout::modal_service`) implement them.

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "toast--success",
            NoticeLevel::Error => "toast--error",
            NoticeLevel::Warning => "toast--warning",
        }
    }
}

/// Transient toast message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Modal yes/no question. Never a native blocking dialog.
#[async_trait(?Send)]
pub trait Confirmer {
    async fn confirm(&self, title: &str, message: &str) -> bool;
}
