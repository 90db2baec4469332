pub mod list;
pub mod parser;

pub use list::ImdbListExtractor;
pub use parser::{extract_title_id, parse_list_page};
