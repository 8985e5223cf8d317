// Export modules for use in tests
pub mod duration;
pub mod element;
pub mod fields;
pub mod host;
pub mod resolver;

pub mod test_utils;

// Re-export the main element components
pub use element::{Element, ElementContent, ElementStyle, HostServices, StoredElement, TextContent};
pub use fields::{FieldDictionary, FieldDictionaryBuilder};
pub use resolver::PlaceholderResolver;
