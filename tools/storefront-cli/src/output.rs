//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::cart::CartLine;
use storefront_commerce::catalog::Product;
use storefront_commerce::store::SaveStatus;

/// Title width used in listings.
pub const TITLE_WIDTH: usize = 30;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print one product per row.
    pub fn products(&self, products: &[Product]) {
        const WIDTHS: [usize; 4] = [4, TITLE_WIDTH + 3, 10, 6];
        self.table_row(&["ID", "TITLE", "PRICE", "RATING"], &WIDTHS);
        for product in products {
            self.table_row(
                &[
                    &product.id.to_string(),
                    &product.short_title(TITLE_WIDTH),
                    &product.price.display(),
                    &format!("{:.1}", product.rating.rate),
                ],
                &WIDTHS,
            );
        }
    }

    /// Print cart lines with their subtotals.
    pub fn cart_lines(&self, lines: &[CartLine]) {
        const WIDTHS: [usize; 5] = [4, TITLE_WIDTH + 3, 10, 4, 10];
        self.table_row(&["ID", "TITLE", "PRICE", "QTY", "SUBTOTAL"], &WIDTHS);
        for line in lines {
            self.table_row(
                &[
                    &line.id().to_string(),
                    &line.product.short_title(TITLE_WIDTH),
                    &line.product.price.display(),
                    &line.quantity.to_string(),
                    &line.subtotal().display(),
                ],
                &WIDTHS,
            );
        }
    }

    /// Report a persistence failure. Successful saves are silent.
    pub fn save_status(&self, what: &str, status: &SaveStatus) {
        if let Some(e) = status.warning() {
            self.warn(&format!("{} changed but could not be saved: {}", what, e));
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a unix timestamp for display in local time.
pub fn format_timestamp(secs: i64) -> String {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => secs.to_string(),
    }
}
