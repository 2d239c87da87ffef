//! Print the built-in fallback term report for each domain.
//!
//! Run with: cargo run --package insights --example term_report

use content::Domain;
use insights::global_term_importances;

fn main() {
    for domain in Domain::ALL {
        let report = global_term_importances(&[], domain, 10);
        println!("{}", report.summary);
        for weight in &report.top_terms {
            println!("  {:<16} {:.4}", weight.term, weight.score);
        }
        println!();
    }
}
