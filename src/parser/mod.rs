pub mod docs;
pub mod headings;

use std::sync::LazyLock;

use scraper::Selector;

pub use docs::{parse_docs, PatternDoc};
pub use headings::{parse_patterns, BugPattern};

static H3: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
