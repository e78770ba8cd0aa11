//! Catalog display formatting
//!
//! Formats course templates for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{CourseCatalog, CourseCatalogEntry, CourseInstance, CourseCashflow, Month};

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Course")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Weeks")]
    weeks: String,
    #[tabled(rename = "Classes/week")]
    classes_per_week: u32,
    #[tabled(rename = "Months")]
    months: usize,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format the catalog as a table
pub fn format_catalog_list(catalog: &CourseCatalog, currency_symbol: &str) -> String {
    if catalog.is_empty() {
        return "No courses in the catalog.".to_string();
    }

    let rows = catalog.iter().map(|entry| CatalogRow {
        name: entry.name.clone(),
        price: entry.price.format_with_symbol(currency_symbol),
        weeks: format_weeks(entry.duration_weeks),
        classes_per_week: entry.classes_per_week,
        months: entry.months_spanned(),
        category: entry.category.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..5), Alignment::right());

    format!("{}\n\n{} course(s)", table, catalog.len())
}

/// Format one course with its month-by-month class plan
///
/// `instance` is a sample run used to show where instructor costs land.
pub fn format_course_details(
    entry: &CourseCatalogEntry,
    instance: &CourseInstance,
    currency_symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Course:           {}\n", entry.name));
    output.push_str(&format!(
        "Price:            {}\n",
        entry.price.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "Duration:         {} weeks\n",
        format_weeks(entry.duration_weeks)
    ));
    output.push_str(&format!("Classes per week: {}\n", entry.classes_per_week));
    output.push_str(&format!("Total classes:    {}\n", format_weeks(entry.total_classes())));
    output.push_str(&format!("Category:         {}\n", entry.category));
    output.push_str(&format!(
        "Launch cost:      {}\n",
        instance.launch_cost().format_with_symbol(currency_symbol)
    ));

    output.push_str(&format!(
        "\nInstructor schedule when starting in {}:\n",
        instance.start_month()
    ));
    for ((month, cost), classes) in instance
        .instructor_cost_by_absolute_month()
        .into_iter()
        .zip(instance.class_distribution())
    {
        let marker = if month < instance.start_month() { " *" } else { "" };
        output.push_str(&format!(
            "  {:<10} {:>6} classes  {:>12}{}\n",
            month.name(),
            format_weeks(classes),
            cost.format_with_symbol(currency_symbol),
            marker
        ));
    }

    if instance.wraps_year_end() {
        output.push_str(&wrap_caveat(instance.start_month()));
    }

    output
}

/// Note printed when a course runs past December
pub fn wrap_caveat(start: Month) -> String {
    format!(
        "  * Runs past December: costs wrap into the early months of the same year \
         (start month {}), not into a following year.\n",
        start.number()
    )
}

/// Render a week or class count without a trailing ".0"
fn format_weeks(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
