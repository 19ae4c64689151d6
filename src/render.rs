//! Pure projections from typed search results to display output: the
//! HTML table the page appended into its results region, and the
//! one-line text renderings the CLI prints.

use std::fmt::Write;

use crate::models::{ItemRecord, OrderRecord};

const ORDER_HEADERS: [&str; 10] = [
    "ID",
    "Customer_id",
    "Order_Date",
    "Status",
    "Shipping_Address",
    "Total_Amount",
    "Payment_Method",
    "Shipping_Cost",
    "Expected_Date",
    "Order_Notes",
];

const ITEM_HEADERS: [&str; 8] = [
    "ID",
    "Order ID",
    "Product ID",
    "Name",
    "Quantity",
    "Unit Price",
    "Total Price",
    "Description",
];

/// Minimal HTML escape for text dropped into table cells. Field values
/// come straight off the wire and must never be interpreted as markup.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn table(headers: &[&str], rows: &[Vec<&str>]) -> String {
    let mut html = String::from(r#"<table class="table table-striped" cellpadding="10">"#);
    html.push_str("<thead><tr>");
    for header in headers {
        let _ = write!(html, r#"<th class="col-md-2">{header}</th>"#);
    }
    html.push_str("</tr></thead><tbody>");
    for (i, row) in rows.iter().enumerate() {
        let _ = write!(html, r#"<tr id="row_{i}">"#);
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Renders search results as the order results table, one row per
/// record in response order.
pub fn order_results_table(records: &[OrderRecord]) -> String {
    let rows: Vec<Vec<&str>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.as_str(),
                r.customer_id.as_str(),
                r.order_date.as_str(),
                r.status.as_str(),
                r.shipping_address.as_str(),
                r.total_amount.as_str(),
                r.payment_method.as_str(),
                r.shipping_cost.as_str(),
                r.expected_date.as_str(),
                r.order_notes.as_str(),
            ]
        })
        .collect();
    table(&ORDER_HEADERS, &rows)
}

/// Renders search results as the item results table.
pub fn item_results_table(records: &[ItemRecord]) -> String {
    let rows: Vec<Vec<&str>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.as_str(),
                r.order_id.as_str(),
                r.product_id.as_str(),
                r.name.as_str(),
                r.quantity.as_str(),
                r.unit_price.as_str(),
                r.total_price.as_str(),
                r.description.as_str(),
            ]
        })
        .collect();
    table(&ITEM_HEADERS, &rows)
}

/// One-line console rendering of an order.
pub fn order_line(record: &OrderRecord) -> String {
    format!(
        "- Order {} • customer {} • status {} • total {}",
        record.id, record.customer_id, record.status, record.total_amount
    )
}

/// One-line console rendering of an item.
pub fn item_line(record: &ItemRecord) -> String {
    format!(
        "  • Item {} • {} x {} @ {} (total {})",
        record.id, record.quantity, record.name, record.unit_price, record.total_price
    )
}
