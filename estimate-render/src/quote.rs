use std::fmt::Write;

use rust_decimal::Decimal;

use estimate_core::calculations::{self, common::round_half_up};
use estimate_core::models::{CompanyProfile, Estimate};

/// Monetary display: exactly two decimal places, half-up.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the estimate as a printable HTML quote.
pub fn render_quote_html(estimate: &Estimate, company: &CompanyProfile) -> String {
    let totals = calculations::compute(&estimate.items, estimate.discount);
    let mut html = String::new();

    push_header(&mut html, estimate, company);
    push_client_block(&mut html, estimate);
    push_items_table(&mut html, estimate);
    push_totals_block(&mut html, &totals);
    push_terms_block(&mut html, company);
    push_signatures(&mut html);

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Quote {}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(&estimate.id),
        html
    )
}

fn push_header(html: &mut String, estimate: &Estimate, company: &CompanyProfile) {
    writeln!(html, "<header class=\"quote-header\">").ok();
    writeln!(html, "  <h1>{}</h1>", escape_html(&company.name)).ok();
    if !company.full_name.is_empty() {
        writeln!(html, "  <h2>{}</h2>", escape_html(&company.full_name)).ok();
    }
    if !company.address.is_empty() {
        writeln!(html, "  <p>{}</p>", escape_html(&company.address)).ok();
    }
    if !company.phone.is_empty() {
        writeln!(html, "  <p>Phone: {}</p>", escape_html(&company.phone)).ok();
    }
    if !company.additional_phone.is_empty() {
        writeln!(
            html,
            "  <p>Alt. phone: {}</p>",
            escape_html(&company.additional_phone)
        )
        .ok();
    }
    if !company.email.is_empty() {
        writeln!(html, "  <p>Email: {}</p>", escape_html(&company.email)).ok();
    }
    writeln!(html, "  <h3>COMMERCIAL PROPOSAL</h3>").ok();
    writeln!(
        html,
        "  <p>No. {} of {}</p>",
        escape_html(&estimate.id),
        estimate.date
    )
    .ok();
    writeln!(html, "</header>").ok();
}

fn push_client_block(html: &mut String, estimate: &Estimate) {
    writeln!(html, "<section class=\"quote-client\">").ok();
    writeln!(html, "  <h4>Client</h4>").ok();
    if !estimate.object.is_empty() {
        writeln!(
            html,
            "  <p><strong>Object:</strong> {}</p>",
            escape_html(&estimate.object)
        )
        .ok();
    }
    if !estimate.address.is_empty() {
        writeln!(
            html,
            "  <p><strong>Address:</strong> {}</p>",
            escape_html(&estimate.address)
        )
        .ok();
    }
    if estimate.rooms > 0 {
        writeln!(html, "  <p><strong>Rooms:</strong> {}</p>", estimate.rooms).ok();
    }

    let mut metrics = Vec::new();
    if estimate.area > Decimal::ZERO {
        metrics.push(format!("Area: {} m²", estimate.area));
    }
    if estimate.perimeter > Decimal::ZERO {
        metrics.push(format!("Perimeter: {} m", estimate.perimeter));
    }
    if estimate.height > Decimal::ZERO {
        metrics.push(format!("Height: {} m", estimate.height));
    }
    if !metrics.is_empty() {
        writeln!(
            html,
            "  <p><strong>Dimensions:</strong> {}</p>",
            metrics.join(", ")
        )
        .ok();
    }
    writeln!(html, "</section>").ok();
}

fn push_items_table(html: &mut String, estimate: &Estimate) {
    writeln!(html, "<section class=\"quote-items\">").ok();
    writeln!(html, "  <h4>Work and materials</h4>").ok();

    if estimate.items.is_empty() {
        writeln!(html, "  <p><em>No items in this estimate</em></p>").ok();
        writeln!(html, "</section>").ok();
        return;
    }

    writeln!(html, "  <table>").ok();
    writeln!(
        html,
        "    <thead><tr><th>No.</th><th>Name</th><th>Unit</th><th>Qty</th><th>Price, RUB</th><th>Total, RUB</th></tr></thead>"
    )
    .ok();
    writeln!(html, "    <tbody>").ok();
    for (index, item) in estimate.items.iter().enumerate() {
        writeln!(
            html,
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            index + 1,
            escape_html(&item.name),
            item.unit.as_str(),
            item.quantity,
            format_money(item.price),
            format_money(calculations::line_total(item)),
        )
        .ok();
    }
    writeln!(html, "    </tbody>").ok();
    writeln!(html, "  </table>").ok();
    writeln!(html, "</section>").ok();
}

fn push_totals_block(html: &mut String, totals: &calculations::EstimateTotals) {
    writeln!(html, "<section class=\"quote-totals\">").ok();
    writeln!(
        html,
        "  <p>Subtotal: {} RUB</p>",
        format_money(totals.subtotal)
    )
    .ok();
    writeln!(
        html,
        "  <p>Discount: {}% ({} RUB)</p>",
        totals.discount_percent,
        format_money(totals.discount_amount)
    )
    .ok();
    writeln!(
        html,
        "  <p><strong>TOTAL DUE: {} RUB</strong></p>",
        format_money(totals.final_total)
    )
    .ok();
    writeln!(html, "</section>").ok();
}

fn push_terms_block(html: &mut String, company: &CompanyProfile) {
    writeln!(html, "<section class=\"quote-terms\">").ok();
    if !company.payment_terms.is_empty() {
        writeln!(html, "  <h4>Payment terms</h4>").ok();
        writeln!(
            html,
            "  <p>{}</p>",
            escape_html(&company.payment_terms).replace('\n', "<br>")
        )
        .ok();
    }
    if !company.warranty.is_empty() {
        writeln!(html, "  <h4>Warranty</h4>").ok();
        writeln!(html, "  <p>{}</p>", escape_html(&company.warranty)).ok();
    }
    writeln!(html, "</section>").ok();
}

fn push_signatures(html: &mut String) {
    writeln!(html, "<section class=\"quote-signatures\">").ok();
    writeln!(html, "  <div><span>_________________</span> Contractor</div>").ok();
    writeln!(html, "  <div><span>_________________</span> Customer</div>").ok();
    writeln!(html, "</section>").ok();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use estimate_core::models::{Estimate, LineItem, Unit};

    use super::*;

    fn sample_estimate() -> Estimate {
        let mut estimate = Estimate::new();
        estimate.name = "Bedroom".to_string();
        estimate.object = "Apartment".to_string();
        estimate.address = "12 Main St".to_string();
        estimate.area = dec!(18.5);
        estimate.items = vec![
            LineItem::new("Sheet & profile", Unit::SquareMeter, dec!(2), dec!(100)),
            LineItem::new("Insert", Unit::LinearMeter, dec!(1), dec!(50)),
        ];
        estimate.discount = dec!(10);
        estimate.recalculate();
        estimate
    }

    #[test]
    fn format_money_always_shows_two_decimals() {
        assert_eq!(format_money(dec!(610)), "610.00");
        assert_eq!(format_money(dec!(25.5)), "25.50");
        assert_eq!(format_money(dec!(25.455)), "25.46");
    }

    #[test]
    fn quote_contains_company_and_client_details() {
        let estimate = sample_estimate();
        let company = estimate_core::models::CompanyProfile::default();

        let html = render_quote_html(&estimate, &company);

        assert!(html.contains("PotolokForLife"));
        assert!(html.contains("COMMERCIAL PROPOSAL"));
        assert!(html.contains("12 Main St"));
        assert!(html.contains("Area: 18.5 m²"));
    }

    #[test]
    fn quote_totals_are_recomputed_not_cached() {
        let mut estimate = sample_estimate();
        // Poison the caches; the renderer must not echo them.
        estimate.total = dec!(999999);
        estimate.final_total = dec!(888888);
        let company = estimate_core::models::CompanyProfile::default();

        let html = render_quote_html(&estimate, &company);

        assert!(html.contains("Subtotal: 250.00 RUB"));
        assert!(html.contains("Discount: 10% (25.00 RUB)"));
        assert!(html.contains("TOTAL DUE: 225.00 RUB"));
        assert!(!html.contains("999999"));
    }

    #[test]
    fn item_names_are_html_escaped() {
        let estimate = sample_estimate();
        let company = estimate_core::models::CompanyProfile::default();

        let html = render_quote_html(&estimate, &company);

        assert!(html.contains("Sheet &amp; profile"));
        assert!(!html.contains("Sheet & profile<"));
    }

    #[test]
    fn empty_estimate_renders_placeholder_row() {
        let mut estimate = Estimate::new();
        estimate.recalculate();
        let company = estimate_core::models::CompanyProfile::default();

        let html = render_quote_html(&estimate, &company);

        assert!(html.contains("No items in this estimate"));
        assert!(html.contains("TOTAL DUE: 0.00 RUB"));
    }

    #[test]
    fn payment_terms_keep_their_line_breaks() {
        let estimate = sample_estimate();
        let company = estimate_core::models::CompanyProfile::default();

        let html = render_quote_html(&estimate, &company);

        assert!(html.contains("<br>"));
        assert!(html.contains("Warranty"));
    }
}
