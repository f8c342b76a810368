//! Category display formatting

use crate::models::{predefined_categories, CategoryCatalog, TransactionType};

/// List the categories available for `kind`, marking custom ones
pub fn format_category_list(catalog: &CategoryCatalog, kind: TransactionType) -> String {
    let mut output = format!("{} categories:\n", kind);

    for name in predefined_categories(kind) {
        output.push_str(&format!("  {}\n", name));
    }
    for name in catalog.custom(kind) {
        output.push_str(&format!("  {} (custom)\n", name));
    }

    output
}
