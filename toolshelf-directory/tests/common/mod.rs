#![allow(dead_code)]

use toolshelf_directory::{Catalog, DirectoryConfig, ToolDirectory};
use toolshelf_storage::Origin;
use toolshelf_types::ToolId;

pub const CATALOG_JSON: &str = r#"[
    {"id":"json-formatter","name":"JSON Formatter","description":"Pretty-print and validate JSON","url":"https://json.example","category":"Dev Utilities","pricing":"free"},
    {"id":"diff-checker","name":"Diff Checker","description":"Compare two texts","url":"https://diff.example","category":"Formatters"},
    {"id":"regex-tester","name":"Regex Tester","description":"Try regular expressions","url":"https://regex.example","category":"Dev Utilities","subcategory":"Text"},
    {"id":"color-picker","name":"Color Picker","description":"Pick colors from a palette","url":"https://color.example","category":"Design"},
    {"id":"image-resizer","name":"Image Resizer","description":"Resize images","url":"https://img.example","category":"Design"}
]"#;

pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).unwrap()
}

pub fn id(slug: &str) -> ToolId {
    ToolId::parse(slug).unwrap()
}

pub fn directory_on(origin: &Origin) -> ToolDirectory {
    ToolDirectory::init(DirectoryConfig::default(), origin.open_context(), catalog()).unwrap()
}

pub fn directory() -> ToolDirectory {
    directory_on(&Origin::in_memory())
}
