use murmur_client::{Field, MemorySurface, Page, Region, Surface};

/// Prints each region whenever its HTML changes. Lists go to stdout, the
/// banner and navigation to stderr.
#[derive(Default)]
pub struct TerminalSurface {
    page: MemorySurface,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TerminalSurface {
    fn set_html(&self, region: Region, html: &str) {
        if self.page.html(region) == html {
            return;
        }
        self.page.set_html(region, html);

        match region {
            Region::TopBar if html.is_empty() => {}
            Region::TopBar => eprintln!("[murmur] {}", html),
            Region::MessageList | Region::UserList => println!("{}", html),
        }
    }

    fn field(&self, field: Field) -> String {
        self.page.field(field)
    }

    fn set_field(&self, field: Field, value: &str) {
        self.page.set_field(field, value);
    }

    fn redirect(&self, page: Page) {
        self.page.redirect(page);
        eprintln!("[murmur] session not valid, go to /{}", page);
    }
}
