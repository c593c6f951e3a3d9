//! CSS selectors for quote pages.

use scraper::Selector;
use std::sync::LazyLock;

/// Quote container.
pub static QUOTE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.quote").unwrap());

pub static TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.text").unwrap());

pub static AUTHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("small.author").unwrap());

/// Tag links; used both page-wide and inside a quote.
pub static TAG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.tag").unwrap());

/// Tag links inside a quote's tag strip.
pub static QUOTE_TAGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".tags a.tag").unwrap());

pub static QUOTE_TEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.quote span.text").unwrap());

pub static QUOTE_AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.quote small.author").unwrap());

/// Author "about" link.
pub static ABOUT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="/author/"]"#).unwrap());

/// Pagination link to the next page.
pub static NEXT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.next > a").unwrap());

/// Class-name locators for the browser-driven pages.
pub mod class {
    pub const QUOTE: &str = "quote";
    pub const TEXT: &str = "text";
    pub const AUTHOR: &str = "author";
}

/// CSS locators for the browser-driven pages.
pub mod css {
    pub const QUOTE_TAGS: &str = ".tags a.tag";
    pub const NEXT_LINK: &str = "li.next > a";
}
