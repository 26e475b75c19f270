//! Proxy: a stand-in with the same interface as the real object that
//! controls access to it (logging, caching, protection).

use std::cell::RefCell;
use std::collections::HashMap;

use crate::console;

pub trait Book {
    fn title(&self) -> String;
    /// `None` past the last readable page.
    fn read_page(&self, page: usize) -> Option<String>;
}

impl<B: Book + ?Sized> Book for &B {
    fn title(&self) -> String {
        (**self).title()
    }

    fn read_page(&self, page: usize) -> Option<String> {
        (**self).read_page(page)
    }
}

// =============================================================================
// Real subject
// =============================================================================

#[derive(Debug, Clone)]
pub struct Novel {
    title: String,
    pages: Vec<String>,
}

impl Novel {
    pub fn new(title: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            title: title.into(),
            pages,
        }
    }

    pub fn plague() -> Self {
        let pages = [
            "The unusual events described in this chronicle occurred in 194- at Oran.",
            "Everyone agreed that, considering their somewhat extraordinary character, they were out of place there.",
            "For its ordinariness is what strikes one first about the town of Oran, which is merely a large \
             French port on the Algerian coast, headquarters of the Prefect of a French Department.",
            "The town itself, let us admit, is ugly. It has a smug, placid air and you need time to discover \
             what it is that makes it different from so many business centers in other parts of the world.",
            "How to conjure up a picture, for instance, of a town without pigeons, without any trees or gardens, \
             where you never hear the beat of wings or the rustle of leaves, a thoroughly negative place, in short?",
        ];
        Self::new("Plague", pages.into_iter().map(String::from).collect())
    }
}

impl Book for Novel {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn read_page(&self, page: usize) -> Option<String> {
        self.pages.get(page).cloned()
    }
}

// =============================================================================
// Proxies
// =============================================================================

pub struct LoggingBookProxy<B> {
    book: B,
}

impl<B: Book> LoggingBookProxy<B> {
    pub fn new(book: B) -> Self {
        Self { book }
    }
}

impl<B: Book> Book for LoggingBookProxy<B> {
    fn title(&self) -> String {
        let title = self.book.title();
        log::info!("book title: {title}");
        title
    }

    fn read_page(&self, page: usize) -> Option<String> {
        log::info!("reading book page {page}");
        self.book.read_page(page)
    }
}

/// Remembers every page it has fetched, including missing ones.
pub struct CachingBookProxy<B> {
    book: B,
    cache: RefCell<HashMap<usize, Option<String>>>,
}

impl<B: Book> CachingBookProxy<B> {
    pub fn new(book: B) -> Self {
        Self {
            book,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<B: Book> Book for CachingBookProxy<B> {
    fn title(&self) -> String {
        self.book.title()
    }

    fn read_page(&self, page: usize) -> Option<String> {
        if let Some(cached) = self.cache.borrow().get(&page) {
            log::debug!("retrieved page {page} from cache");
            return cached.clone();
        }
        log::debug!("saved page {page} to cache");
        let content = self.book.read_page(page);
        self.cache.borrow_mut().insert(page, content.clone());
        content
    }
}

/// Pages after `last_page` are not readable in preview mode.
pub struct PreviewBookProxy<B> {
    book: B,
    last_page: usize,
}

impl<B: Book> PreviewBookProxy<B> {
    pub fn new(book: B, last_page: usize) -> Self {
        Self { book, last_page }
    }
}

impl<B: Book> Book for PreviewBookProxy<B> {
    fn title(&self) -> String {
        self.book.title()
    }

    fn read_page(&self, page: usize) -> Option<String> {
        if page > self.last_page {
            return None;
        }
        self.book.read_page(page)
    }
}

// =============================================================================
// Client
// =============================================================================

pub struct Student {
    name: String,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads from the first page until one comes back empty.
    pub fn read_book(&self, book: &dyn Book) -> Vec<String> {
        (0..).map_while(|page| book.read_page(page)).collect()
    }
}

pub fn run(preview_last_page: usize) {
    console::demo("Proxy");

    let novel = Novel::plague();
    let student = Student::new("Albert");

    println!("{} reads {} in full:", student.name(), novel.title());
    for page in student.read_book(&novel) {
        println!("Reading: {page}");
    }

    let book = PreviewBookProxy::new(
        CachingBookProxy::new(LoggingBookProxy::new(&novel)),
        preview_last_page,
    );
    println!("{} reads a preview of {}:", student.name(), book.title());
    for page in student.read_book(&book) {
        println!("Reading: {page}");
    }
}
