use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// HTML regions the views write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Transient banner across the top of every page.
    TopBar,
    MessageList,
    UserList,
}

/// Text inputs the views read from or fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nickname,
    Token,
    MessageBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Account,
    Chat,
    Users,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Chat => "chat",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where rendered output goes: the page the user is looking at.
pub trait Surface: Send + Sync {
    /// Replace the contents of `region` with `html`.
    fn set_html(&self, region: Region, html: &str);
    fn field(&self, field: Field) -> String;
    fn set_field(&self, field: Field, value: &str);
    fn redirect(&self, page: Page);
}

/// Surface that keeps everything in memory. Backs the terminal front end
/// and the tests.
#[derive(Default)]
pub struct MemorySurface {
    regions: Mutex<HashMap<Region, String>>,
    fields: Mutex<HashMap<Field, String>>,
    redirects: Mutex<Vec<Page>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self, region: Region) -> String {
        lock(&self.regions).get(&region).cloned().unwrap_or_default()
    }

    /// Pages redirected to so far, oldest first.
    pub fn redirects(&self) -> Vec<Page> {
        lock(&self.redirects).clone()
    }
}

impl Surface for MemorySurface {
    fn set_html(&self, region: Region, html: &str) {
        lock(&self.regions).insert(region, html.to_string());
    }

    fn field(&self, field: Field) -> String {
        lock(&self.fields).get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: Field, value: &str) {
        lock(&self.fields).insert(field, value.to_string());
    }

    fn redirect(&self, page: Page) {
        lock(&self.redirects).push(page);
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
