//! Category display formatting

use crate::services::CategorySummary;

/// Format categories with their usage counts as a table
pub fn format_category_list(summaries: &[CategorySummary]) -> String {
    if summaries.is_empty() {
        return "No categories found.\n\n\
                Categories are created the first time a transaction uses them.\n"
            .to_string();
    }

    let title_width = summaries
        .iter()
        .map(|s| s.category.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<title_width$}  {:>12}\n",
        "ID",
        "Title",
        "Transactions",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<title_width$}  {:->12}\n",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<12}  {:<title_width$}  {:>12}\n",
            summary.category.id.to_string(),
            summary.category.title,
            summary.transaction_count,
            title_width = title_width,
        ));
    }

    output
}
