//! CSS selectors for catalog listing pages.
//!
//! Update this file if the listing markup changes.

use scraper::Selector;
use std::sync::LazyLock;

/// Product block, the repeating unit of a listing page.
pub static PRODUCT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.product_pod").unwrap());

/// Title link inside a product block (carries `title` and `href`).
pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 > a").unwrap());

pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.price_color").unwrap());

/// Stock status line ("In stock", "Out of stock").
pub static STOCK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.instock").unwrap());

/// Star rating; the ordinal is encoded as a class name (`star-rating Three`).
pub static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.star-rating").unwrap());
